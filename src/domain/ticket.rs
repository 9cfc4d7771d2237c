use std::fmt;

use serde::Deserialize;

/// Freshservice ticket status, keyed by the numeric code the API returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
    Closed,
    OnHold,
    Other(i64),
}

impl TicketStatus {
    pub fn code(&self) -> i64 {
        match self {
            TicketStatus::Open => 2,
            TicketStatus::Pending => 3,
            TicketStatus::Resolved => 4,
            TicketStatus::Closed => 5,
            TicketStatus::OnHold => 6,
            TicketStatus::Other(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::Pending => "Pending",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
            TicketStatus::OnHold => "On Hold",
            TicketStatus::Other(_) => "Unknown",
        }
    }

    /// Statuses that still need engineering attention.
    pub fn default_allowed() -> Vec<TicketStatus> {
        vec![
            TicketStatus::Open,
            TicketStatus::Pending,
            TicketStatus::OnHold,
        ]
    }
}

impl From<i64> for TicketStatus {
    fn from(code: i64) -> Self {
        match code {
            2 => TicketStatus::Open,
            3 => TicketStatus::Pending,
            4 => TicketStatus::Resolved,
            5 => TicketStatus::Closed,
            6 => TicketStatus::OnHold,
            other => TicketStatus::Other(other),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default, rename = "description_text", deserialize_with = "null_as_empty")]
    pub description: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub requester_id: Option<u64>,
    #[serde(default)]
    pub group_id: Option<u64>,
}

impl Ticket {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::for_ticket(self.id, &self.subject)
    }

    pub fn belongs_to(&self, group_id: u64) -> bool {
        self.group_id == Some(group_id)
    }

    /// Agent-facing page for the ticket on the helpdesk domain.
    pub fn helpdesk_url(&self, domain: &str) -> String {
        format!("https://{domain}/helpdesk/tickets/{}", self.id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

const KEY_PREFIX: &str = "[Fresh Service] [#";

/// Issue title that identifies the ticket an issue was created for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(String);

impl DedupKey {
    pub fn for_ticket(id: u64, subject: &str) -> Self {
        Self(format!("{KEY_PREFIX}{id}] {subject}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Recovers the ticket id from a title produced by [`DedupKey::for_ticket`].
    pub fn parse_ticket_id(title: &str) -> Option<u64> {
        let rest = title.strip_prefix(KEY_PREFIX)?;
        let (digits, _) = rest.split_once(']')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
