use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::sync::{SyncOptions, SyncReport, sync_tickets};

#[derive(Debug, Clone, Default)]
pub struct SyncCommandArgs {
    pub dry_run: bool,
}

pub async fn run(ctx: &AppContext, args: SyncCommandArgs) -> AppResult<SyncReport> {
    sync_tickets(
        ctx,
        SyncOptions {
            dry_run: args.dry_run,
        },
    )
    .await
}
