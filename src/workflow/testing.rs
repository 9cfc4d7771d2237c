use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::issue::{CreatedIssue, IssueCreateRequest, TrackerIssue};
use crate::domain::ticket::{Ticket, TicketStatus};
use crate::error::{AppError, AppResult};
use crate::services::{IssueTrackerService, TicketSourceService};

pub fn ticket(id: u64, subject: &str, status: i64, group_id: Option<u64>) -> Ticket {
    Ticket {
        id,
        subject: subject.to_string(),
        description: format!("description of {id}"),
        status: TicketStatus::from(status),
        requester_id: Some(9),
        group_id,
    }
}

pub fn upstream_error(status: u16) -> AppError {
    AppError::Upstream {
        service: "fake",
        status: StatusCode::from_u16(status).unwrap(),
        body: format!("fake failure {status}"),
    }
}

pub fn issues(titles: &[&str]) -> Vec<TrackerIssue> {
    titles
        .iter()
        .map(|title| TrackerIssue {
            title: title.to_string(),
        })
        .collect()
}

/// Serves scripted pages in order; once the script runs out every page is empty.
pub struct FakeTicketSource {
    page_size: usize,
    pages: Mutex<VecDeque<AppResult<Vec<Ticket>>>>,
    requested: Mutex<Vec<u32>>,
}

impl FakeTicketSource {
    pub fn with_page_size(page_size: usize, pages: Vec<AppResult<Vec<Ticket>>>) -> Self {
        Self {
            page_size,
            pages: Mutex::new(pages.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn single_page(tickets: Vec<Ticket>) -> Self {
        Self::with_page_size(100, vec![Ok(tickets)])
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketSourceService for FakeTicketSource {
    async fn list_tickets(&self, page: u32) -> AppResult<Vec<Ticket>> {
        self.requested.lock().unwrap().push(page);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

#[derive(Default)]
pub struct FakeTracker {
    pages: Mutex<VecDeque<AppResult<Vec<TrackerIssue>>>>,
    requested: Mutex<Vec<u32>>,
    failing_tickets: HashSet<u64>,
    created: Mutex<Vec<IssueCreateRequest>>,
}

impl FakeTracker {
    pub fn with_pages(pages: Vec<AppResult<Vec<TrackerIssue>>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn failing_for(mut self, ticket_ids: &[u64]) -> Self {
        self.failing_tickets.extend(ticket_ids);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<IssueCreateRequest> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    async fn list_issues(&self, page: u32) -> AppResult<Vec<TrackerIssue>> {
        self.requested.lock().unwrap().push(page);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_issue(&self, request: &IssueCreateRequest) -> AppResult<CreatedIssue> {
        if self.failing_tickets.contains(&request.ticket_id) {
            return Err(AppError::Upstream {
                service: "fake",
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: "Validation Failed".to_string(),
            });
        }

        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        let number = created.len() as u64;
        Ok(CreatedIssue {
            number,
            html_url: format!("https://github.test/issues/{number}"),
        })
    }
}
