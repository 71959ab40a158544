use crate::model::{hotel::Room, id::BookingId};

pub mod event;

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub room: Room,
}
