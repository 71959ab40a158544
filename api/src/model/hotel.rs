use chrono::{DateTime, Utc};
use kernel::model::{
    hotel::{Hotel, HotelWithRooms, Room},
    id::{HotelId, RoomId},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub id: HotelId,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Hotel> for HotelResponse {
    fn from(value: Hotel) -> Self {
        let Hotel {
            hotel_id,
            hotel_name,
            image_url,
            created_at,
            updated_at,
        } = value;
        Self {
            id: hotel_id,
            name: hotel_name,
            image: image_url,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithRoomsResponse {
    pub id: HotelId,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rooms: Vec<RoomResponse>,
}

impl From<HotelWithRooms> for HotelWithRoomsResponse {
    fn from(value: HotelWithRooms) -> Self {
        let HotelWithRooms { hotel, rooms } = value;
        let Hotel {
            hotel_id,
            hotel_name,
            image_url,
            created_at,
            updated_at,
        } = hotel;
        Self {
            id: hotel_id,
            name: hotel_name,
            image: image_url,
            created_at,
            updated_at,
            rooms: rooms.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            hotel_id,
            room_name,
            capacity,
            created_at,
            updated_at,
        } = value;
        Self {
            id: room_id,
            hotel_id,
            name: room_name,
            capacity,
            created_at,
            updated_at,
        }
    }
}
