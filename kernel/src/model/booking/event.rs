use crate::model::id::{BookingId, RoomId, UserId};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
}

#[derive(new, Debug)]
pub struct MoveBooking {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
}

// 新規予約と部屋の変更は所有者チェックの有無が異なるため、
// nullable な予約 ID ではなくバリアントで区別する
#[derive(Debug)]
pub enum UpsertBooking {
    Create(CreateBooking),
    Move(MoveBooking),
}

impl UpsertBooking {
    pub fn user_id(&self) -> UserId {
        match self {
            UpsertBooking::Create(event) => event.user_id,
            UpsertBooking::Move(event) => event.user_id,
        }
    }

    pub fn room_id(&self) -> RoomId {
        match self {
            UpsertBooking::Create(event) => event.room_id,
            UpsertBooking::Move(event) => event.room_id,
        }
    }
}
