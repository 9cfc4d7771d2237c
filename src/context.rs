use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{IssueTrackerService, TicketSourceService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub ticket_source: Arc<dyn TicketSourceService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        ticket_source: Arc<dyn TicketSourceService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
    ) -> Self {
        Self {
            config,
            ticket_source,
            issue_tracker,
        }
    }
}
