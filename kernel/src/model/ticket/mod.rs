use crate::model::id::{TicketId, TicketTypeId};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// DB の status 列に格納する文字列と対応させる
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

#[derive(Debug)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
}

#[derive(Debug)]
pub struct TicketType {
    pub ticket_type_id: TicketTypeId,
    pub ticket_type_name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl Ticket {
    // 宿泊予約が許可されるチケットかどうかを判定する
    // 支払い済み・現地参加・宿泊込みの3条件をすべて満たす必要がある
    pub fn grants_hotel_access(&self) -> bool {
        self.status == TicketStatus::Paid
            && !self.ticket_type.is_remote
            && self.ticket_type.includes_hotel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ticket(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
        Ticket {
            ticket_id: TicketId::new(),
            status,
            ticket_type: TicketType {
                ticket_type_id: TicketTypeId::new(),
                ticket_type_name: "Test TicketType".into(),
                price: 550,
                is_remote,
                includes_hotel,
            },
        }
    }

    #[rstest]
    #[case(TicketStatus::Paid, false, true, true)]
    #[case(TicketStatus::Reserved, false, true, false)]
    #[case(TicketStatus::Paid, true, false, false)]
    #[case(TicketStatus::Paid, true, true, false)]
    #[case(TicketStatus::Paid, false, false, false)]
    #[case(TicketStatus::Reserved, true, false, false)]
    fn test_grants_hotel_access(
        #[case] status: TicketStatus,
        #[case] is_remote: bool,
        #[case] includes_hotel: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(
            ticket(status, is_remote, includes_hotel).grants_hotel_access(),
            expected
        );
    }

    #[test]
    fn test_ticket_status_round_trip() {
        use strum::IntoEnumIterator;

        // DB に格納した文字列から復元できること
        for status in TicketStatus::iter() {
            let stored = status.as_ref().to_string();
            assert_eq!(stored.parse::<TicketStatus>().unwrap(), status);
        }
    }
}
