use async_trait::async_trait;

use crate::domain::issue::{CreatedIssue, IssueCreateRequest, TrackerIssue};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Lists one page of issues in every state. An empty page means there are no more.
    async fn list_issues(&self, page: u32) -> AppResult<Vec<TrackerIssue>>;
    async fn create_issue(&self, request: &IssueCreateRequest) -> AppResult<CreatedIssue>;
}
