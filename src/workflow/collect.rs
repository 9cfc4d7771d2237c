use tracing::{debug, info, warn};

use crate::domain::issue::ExistingTitles;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

/// Collects the title of every issue in the repository, whatever its state.
///
/// Paging stops at the first empty page. Any failure on page 1 is returned to the
/// caller, as is a transport or decode failure on any page. A rejected request on
/// a later page ends collection with the titles gathered so far, which can at
/// worst lead to a duplicate issue.
pub async fn collect_all_titles(
    tracker: &dyn IssueTrackerService,
    max_pages: u32,
) -> AppResult<ExistingTitles> {
    let mut existing = ExistingTitles::new();
    let mut reached_end = false;

    for page in 1..=max_pages {
        let issues = match tracker.list_issues(page).await {
            Ok(issues) => issues,
            Err(err @ AppError::Upstream { .. }) if page > 1 => {
                warn!(
                    page,
                    error = %err,
                    collected = existing.len(),
                    "failed to fetch issue page; continuing with titles collected so far"
                );
                existing.mark_truncated();
                reached_end = true;
                break;
            }
            Err(err) => return Err(err),
        };
        existing.record_page();

        if issues.is_empty() {
            reached_end = true;
            break;
        }

        debug!(page, count = issues.len(), "fetched issue page");
        for issue in issues {
            existing.insert(issue.title);
        }
    }

    if !reached_end {
        warn!(
            max_pages,
            "issue listing hit the page cap; older issues may be recreated"
        );
        existing.mark_truncated();
    }

    if existing.is_empty() {
        debug!("repository has no issues yet");
    }
    info!(
        titles = existing.len(),
        pages = existing.pages_scanned(),
        "collected existing issue titles"
    );
    Ok(existing)
}
