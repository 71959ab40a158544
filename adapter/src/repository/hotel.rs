use crate::database::{
    model::hotel::{HotelRow, RoomRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    hotel::{Hotel, HotelWithRooms, Room},
    id::HotelId,
};
use kernel::repository::hotel::HotelRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HotelRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Hotel>> {
        // 登録順に全件を返す
        let rows: Vec<HotelRow> = sqlx::query_as(
            r#"
                SELECT
                    hotel_id,
                    hotel_name,
                    image_url,
                    created_at,
                    updated_at
                FROM hotels
                ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_with_rooms(&self, hotel_id: HotelId) -> AppResult<Option<HotelWithRooms>> {
        let hotel_row: Option<HotelRow> = sqlx::query_as(
            r#"
                SELECT
                    hotel_id,
                    hotel_name,
                    image_url,
                    created_at,
                    updated_at
                FROM hotels
                WHERE hotel_id = $1
            "#,
        )
        .bind(hotel_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(hotel_row) = hotel_row else {
            return Ok(None);
        };

        let rooms: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    hotel_id,
                    room_name,
                    capacity,
                    created_at,
                    updated_at
                FROM rooms
                WHERE hotel_id = $1
                ORDER BY created_at ASC
            "#,
        )
        .bind(hotel_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rooms = rooms.into_iter().map(Room::from).collect();
        Ok(Some(hotel_row.into_hotel_with_rooms(rooms)))
    }
}
