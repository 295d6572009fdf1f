use crate::state::AppState;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Periodically delete read notifications past the retention window. Runs on
/// the schedule from config (daily by default).
pub async fn start_cleanup_job(state: AppState) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new().await?;
    let schedule = state.config.cleanup_schedule.clone();

    let job = Job::new_async(schedule.as_str(), move |_uuid, _l| {
        let state = state.clone();

        Box::pin(async move {
            let days = state.config.notification_retention_days;
            if let Err(e) = state
                .notification_service
                .cleanup_old_notifications(days)
                .await
            {
                error!("Notification cleanup failed: {:?}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Notification cleanup job scheduled ({})", schedule);
    Ok(())
}
