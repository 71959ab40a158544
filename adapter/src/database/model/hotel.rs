use kernel::model::{
    hotel::{Hotel, HotelWithRooms, Room},
    id::{HotelId, RoomId},
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct HotelRow {
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(value: HotelRow) -> Self {
        let HotelRow {
            hotel_id,
            hotel_name,
            image_url,
            created_at,
            updated_at,
        } = value;
        Hotel {
            hotel_id,
            hotel_name,
            image_url,
            created_at,
            updated_at,
        }
    }
}

// From トレイトの実装の代わりに、部屋一覧を引数にとる into_hotel_with_rooms メソッドを実装する
impl HotelRow {
    pub fn into_hotel_with_rooms(self, rooms: Vec<Room>) -> HotelWithRooms {
        HotelWithRooms {
            hotel: Hotel::from(self),
            rooms,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            hotel_id,
            room_name,
            capacity,
            created_at,
            updated_at,
        } = value;
        Room {
            room_id,
            hotel_id,
            room_name,
            capacity,
            created_at,
            updated_at,
        }
    }
}
