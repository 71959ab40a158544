use garde::Validate;
use kernel::model::{
    booking::Booking,
    id::{BookingId, RoomId},
};
use serde::{Deserialize, Serialize};

use crate::model::hotel::RoomResponse;

// 新規予約と部屋の変更はどちらも部屋 ID のみを受け取る
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub room_id: RoomId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub room: RoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking { booking_id, room } = value;
        Self {
            id: booking_id,
            room: room.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: BookingId,
}

impl From<BookingId> for BookingIdResponse {
    fn from(value: BookingId) -> Self {
        Self { booking_id: value }
    }
}
