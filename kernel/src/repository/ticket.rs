use crate::model::{id::UserId, ticket::Ticket};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    // 申込（enrollment）経由でユーザーのチケットを取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Ticket>>;
}
