use tracing::{error, info};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::collect::collect_all_titles;
use crate::workflow::enumerate::fetch_qualifying_tickets;
use crate::workflow::reconcile::{ReconcileOptions, reconcile};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub tickets_fetched: usize,
    pub tickets_qualifying: usize,
    pub already_synced: usize,
    pub created: usize,
    pub failed: usize,
    pub planned: usize,
    pub issue_pages_scanned: u32,
    pub titles_truncated: bool,
}

/// Runs one synchronization pass.
///
/// Errors from either enumeration stage are returned; individual creation
/// failures are logged, counted and never abort the run.
pub async fn sync_tickets(ctx: &AppContext, options: SyncOptions) -> AppResult<SyncReport> {
    let config = &ctx.config;

    info!(repository = %config.repository, "fetching existing issues");
    let existing = collect_all_titles(ctx.issue_tracker.as_ref(), config.max_pages).await?;

    info!(group_id = config.target_group_id, "fetching helpdesk tickets");
    let enumeration = fetch_qualifying_tickets(
        ctx.ticket_source.as_ref(),
        config.target_group_id,
        &config.allowed_statuses,
        config.max_pages,
    )
    .await?;

    let reconciliation = reconcile(
        &enumeration.qualifying,
        &existing,
        &ReconcileOptions {
            domain: &config.freshservice_domain,
            match_strategy: config.match_strategy,
        },
    );

    let mut report = SyncReport {
        tickets_fetched: enumeration.fetched,
        tickets_qualifying: enumeration.qualifying.len(),
        already_synced: reconciliation.already_synced,
        issue_pages_scanned: existing.pages_scanned(),
        titles_truncated: existing.truncated(),
        ..SyncReport::default()
    };

    for (index, request) in reconciliation.requests.iter().enumerate() {
        if options.dry_run {
            info!(
                ticket_id = request.ticket_id,
                title = %request.title,
                "dry run: would create issue"
            );
            report.planned += 1;
            continue;
        }

        if index > 0 && !config.request_delay.is_zero() {
            tokio::time::sleep(config.request_delay).await;
        }

        info!(ticket_id = request.ticket_id, "creating issue");
        match ctx.issue_tracker.create_issue(request).await {
            Ok(created) => {
                info!(
                    ticket_id = request.ticket_id,
                    issue = created.number,
                    url = %created.html_url,
                    "issue created"
                );
                report.created += 1;
            }
            Err(err) => {
                error!(
                    ticket_id = request.ticket_id,
                    status = ?err.status(),
                    error = %err,
                    "failed to create issue"
                );
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
