use crate::model::{
    booking::{event::UpsertBooking, Booking},
    id::{BookingId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // ユーザーの予約を部屋の情報と合わせて取得する
    // 複数件存在する場合はどれか1件を返す
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>>;
    // 予約の新規作成または部屋の変更を行い、対象の予約 ID を返す
    async fn upsert(&self, event: UpsertBooking) -> AppResult<BookingId>;
}
