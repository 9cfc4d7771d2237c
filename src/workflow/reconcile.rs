use tracing::{debug, info};

use crate::domain::issue::{ExistingTitles, IssueCreateRequest, MatchStrategy};
use crate::domain::ticket::Ticket;

#[derive(Debug, Clone)]
pub struct ReconcileOptions<'a> {
    /// Helpdesk hostname used for the ticket link in the issue body.
    pub domain: &'a str,
    pub match_strategy: MatchStrategy,
}

#[derive(Debug, Default)]
pub struct Reconciliation {
    pub requests: Vec<IssueCreateRequest>,
    pub already_synced: usize,
}

/// Decides which tickets still need an issue.
///
/// Pure over its inputs: `existing` is the snapshot taken at run start and is not
/// updated as requests are emitted, so a ticket listed twice yields two requests.
pub fn reconcile(
    tickets: &[Ticket],
    existing: &ExistingTitles,
    options: &ReconcileOptions<'_>,
) -> Reconciliation {
    let mut outcome = Reconciliation::default();

    for ticket in tickets {
        if existing.is_synced(ticket, options.match_strategy) {
            info!(ticket_id = ticket.id, "ticket already synced; skipping");
            outcome.already_synced += 1;
            continue;
        }

        let key = ticket.dedup_key();
        debug!(ticket_id = ticket.id, title = %key, "ticket needs an issue");
        outcome.requests.push(IssueCreateRequest {
            ticket_id: ticket.id,
            title: key.into_string(),
            body: render_body(ticket, options.domain),
        });
    }

    outcome
}

pub fn render_body(ticket: &Ticket, domain: &str) -> String {
    let requester = ticket
        .requester_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    format!(
        "**Freshservice Ticket**\n\
         \n\
         - **ID**: {id}\n\
         - **Subject**: {subject}\n\
         - **Description**: {description}\n\
         - **Status**: {status}\n\
         - **Requester**: {requester}\n\
         - **Link**: {link}",
        id = ticket.id,
        subject = ticket.subject,
        description = ticket.description.trim(),
        status = ticket.status.label(),
        link = ticket.helpdesk_url(domain),
    )
}
