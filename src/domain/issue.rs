use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::ticket::{DedupKey, Ticket};

/// Issue as listed by the tracker. Only the title takes part in matching.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerIssue {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueCreateRequest {
    #[serde(skip)]
    pub ticket_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: String,
}

/// How an existing issue is recognized as belonging to a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Title must equal the ticket's current dedup key.
    ExactTitle,
    /// Any title carrying the ticket id counts, so subject edits are tolerated.
    #[default]
    TicketId,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::ExactTitle => "exact-title",
            MatchStrategy::TicketId => "ticket-id",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "exact-title" | "exact" | "title" => Some(MatchStrategy::ExactTitle),
            "ticket-id" | "id" => Some(MatchStrategy::TicketId),
            _ => None,
        }
    }
}

/// Titles visible in the tracker at run start, across every issue state.
#[derive(Debug, Clone, Default)]
pub struct ExistingTitles {
    titles: HashSet<String>,
    ticket_ids: HashSet<u64>,
    pages_scanned: u32,
    truncated: bool,
}

impl ExistingTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: String) {
        if let Some(id) = DedupKey::parse_ticket_id(&title) {
            self.ticket_ids.insert(id);
        }
        self.titles.insert(title);
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn contains_ticket_id(&self, id: u64) -> bool {
        self.ticket_ids.contains(&id)
    }

    pub fn is_synced(&self, ticket: &Ticket, strategy: MatchStrategy) -> bool {
        if self.contains_title(ticket.dedup_key().as_str()) {
            return true;
        }
        match strategy {
            MatchStrategy::ExactTitle => false,
            MatchStrategy::TicketId => self.contains_ticket_id(ticket.id),
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn pages_scanned(&self) -> u32 {
        self.pages_scanned
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn record_page(&mut self) {
        self.pages_scanned += 1;
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }
}

impl<S: Into<String>> FromIterator<S> for ExistingTitles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut existing = Self::new();
        for title in iter {
            existing.insert(title.into());
        }
        existing
    }
}
