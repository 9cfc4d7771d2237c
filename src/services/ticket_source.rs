use async_trait::async_trait;

use crate::domain::ticket::Ticket;
use crate::error::AppResult;

#[async_trait]
pub trait TicketSourceService: Send + Sync {
    async fn list_tickets(&self, page: u32) -> AppResult<Vec<Ticket>>;

    /// Tickets per full page; a shorter page is the last one.
    fn page_size(&self) -> usize;
}
