use crate::database::{model::ticket::TicketRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::UserId, ticket::Ticket};
use kernel::repository::ticket::TicketRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct TicketRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl TicketRepository for TicketRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Ticket>> {
        // チケットはユーザーに直接ではなく申込（enrollment）に紐づくため、
        // enrollments を経由して ticket_types と合わせて抽出する
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
                SELECT
                    t.ticket_id,
                    t.status,
                    tt.ticket_type_id,
                    tt.ticket_type_name,
                    tt.price,
                    tt.is_remote,
                    tt.includes_hotel
                FROM tickets AS t
                INNER JOIN enrollments AS e ON t.enrollment_id = e.enrollment_id
                INNER JOIN ticket_types AS tt ON t.ticket_type_id = tt.ticket_type_id
                WHERE e.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Ticket::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::ticket::TicketStatus;

    const ALICE: &str = "11111111-1111-1111-1111-111111111111";
    const DAVE: &str = "44444444-4444-4444-4444-444444444444";
    const ERIN: &str = "55555555-5555-5555-5555-555555555555";

    fn user(id: &str) -> UserId {
        id.parse().unwrap()
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_find_ticket_by_user_id(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = TicketRepositoryImpl::new(ConnectionPool::new(pool));

        let ticket = repo.find_by_user_id(user(ALICE)).await?;
        let Some(ticket) = ticket else {
            panic!("ticket should be found");
        };
        assert_eq!(ticket.status, TicketStatus::Paid);
        assert!(ticket.ticket_type.includes_hotel);
        assert!(ticket.grants_hotel_access());

        let unpaid = repo.find_by_user_id(user(ERIN)).await?;
        assert!(unpaid.is_some_and(|t| !t.grants_hotel_access()));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_find_ticket_by_user_id_without_ticket(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = TicketRepositoryImpl::new(ConnectionPool::new(pool));

        let ticket = repo.find_by_user_id(user(DAVE)).await?;
        assert!(ticket.is_none());

        Ok(())
    }
}
