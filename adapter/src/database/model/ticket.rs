use std::str::FromStr;

use kernel::model::{
    id::{TicketId, TicketTypeId},
    ticket::{Ticket, TicketStatus, TicketType},
};
use shared::error::AppError;

// tickets と ticket_types を JOIN した1件分のレコード
#[derive(sqlx::FromRow)]
pub struct TicketRow {
    pub ticket_id: TicketId,
    pub status: String,
    pub ticket_type_id: TicketTypeId,
    pub ticket_type_name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(value: TicketRow) -> Result<Self, Self::Error> {
        let TicketRow {
            ticket_id,
            status,
            ticket_type_id,
            ticket_type_name,
            price,
            is_remote,
            includes_hotel,
        } = value;
        // status 列には RESERVED または PAID が格納されている
        let status = TicketStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Ticket {
            ticket_id,
            status,
            ticket_type: TicketType {
                ticket_type_id,
                ticket_type_name,
                price,
                is_remote,
                includes_hotel,
            },
        })
    }
}
