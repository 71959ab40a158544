use kernel::model::{
    booking::Booking,
    hotel::Room,
    id::{BookingId, HotelId, RoomId},
};
use sqlx::types::chrono::{DateTime, Utc};

// bookings と rooms を JOIN した1件分のレコード
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            room_id,
            hotel_id,
            room_name,
            capacity,
            created_at,
            updated_at,
        } = value;
        Booking {
            booking_id,
            room: Room {
                room_id,
                hotel_id,
                room_name,
                capacity,
                created_at,
                updated_at,
            },
        }
    }
}

// 定員チェックに使う adapter 内部の型
#[derive(sqlx::FromRow)]
pub struct RoomCapacityRow {
    pub room_id: RoomId,
    pub capacity: i32,
}
