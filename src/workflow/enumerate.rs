use tracing::{debug, info};

use crate::domain::ticket::{Ticket, TicketStatus};
use crate::error::{AppError, AppResult};
use crate::services::TicketSourceService;

#[derive(Debug)]
pub struct TicketEnumeration {
    pub fetched: usize,
    pub qualifying: Vec<Ticket>,
}

/// Lists every ticket page and keeps the ones belonging to `group_id` with an allowed status.
///
/// Any failing page aborts the whole enumeration, as does running out of pages
/// before the listing ends; partial ticket lists are never used.
pub async fn fetch_qualifying_tickets(
    source: &dyn TicketSourceService,
    group_id: u64,
    allowed_statuses: &[TicketStatus],
    max_pages: u32,
) -> AppResult<TicketEnumeration> {
    let page_size = source.page_size();
    let mut tickets = Vec::new();

    for page in 1..=max_pages {
        let batch = source.list_tickets(page).await?;
        let batch_len = batch.len();
        debug!(page, count = batch_len, "fetched ticket page");
        tickets.extend(batch);

        if batch_len < page_size {
            break;
        }
        if page == max_pages {
            return Err(AppError::PageLimit {
                service: "Freshservice",
                max_pages,
            });
        }
    }

    let fetched = tickets.len();
    let qualifying = filter_qualifying(tickets, group_id, allowed_statuses);
    info!(
        fetched,
        qualifying = qualifying.len(),
        group_id,
        "enumerated helpdesk tickets"
    );

    Ok(TicketEnumeration {
        fetched,
        qualifying,
    })
}

pub fn filter_qualifying(
    tickets: Vec<Ticket>,
    group_id: u64,
    allowed_statuses: &[TicketStatus],
) -> Vec<Ticket> {
    tickets
        .into_iter()
        .filter(|ticket| ticket.belongs_to(group_id) && allowed_statuses.contains(&ticket.status))
        .collect()
}
