pub mod issue_tracker;
pub mod ticket_source;

pub use issue_tracker::IssueTrackerService;
pub use ticket_source::TicketSourceService;
