use crate::model::{
    hotel::{Hotel, HotelWithRooms},
    id::HotelId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    // すべてのホテルを取得する
    async fn find_all(&self) -> AppResult<Vec<Hotel>>;
    // ホテルを部屋一覧と合わせて取得する
    async fn find_with_rooms(&self, hotel_id: HotelId) -> AppResult<Option<HotelWithRooms>>;
}
