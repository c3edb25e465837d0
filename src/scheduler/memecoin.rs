use chrono::Utc;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::CleanupConfig,
    error::AppError,
    service::memecoin::{cleanup::CrashCleanup, MemecoinEngine},
};

/// Starts the memecoin scheduler
///
/// Two jobs are registered:
/// - the simulation tick, repeated every `tick_interval`; a tick that fires while
///   the previous one is still running is skipped by the engine
/// - the crashed-token cleanup, on the `cleanup.cron` schedule
///
/// # Arguments
/// - `engine`: Simulation engine shared with the tick job
/// - `cleanup`: Maintenance pass shared with the cleanup job
/// - `cleanup_config`: Cron schedule of the cleanup job
///
/// # Returns
/// - `Ok(JobScheduler)`: Running scheduler, to be shut down on exit
/// - `Err(AppError::SchedulerErr)`: Invalid schedule or scheduler failure
pub async fn start_scheduler(
    engine: Arc<MemecoinEngine>,
    cleanup: Arc<CrashCleanup>,
    cleanup_config: &CleanupConfig,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let tick_interval = engine.config().tick_interval;
    let tick_engine = engine.clone();
    let tick_job = Job::new_repeated_async(tick_interval, move |_uuid, _lock| {
        let engine = tick_engine.clone();

        Box::pin(async move {
            engine.run_scheduled_tick().await;
        })
    })?;

    let cleanup_job = Job::new_async(cleanup_config.cron.as_str(), move |_uuid, _lock| {
        let cleanup = cleanup.clone();

        Box::pin(async move {
            match cleanup.purge(Utc::now()).await {
                Ok(report) if report.purged > 0 || report.failed > 0 => {
                    tracing::info!(
                        "Crash cleanup purged {} token(s), {} failed",
                        report.purged,
                        report.failed
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Error running crash cleanup: {}", e),
            }
        })
    })?;

    scheduler.add(tick_job).await?;
    scheduler.add(cleanup_job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Memecoin scheduler started: tick every {}s, cleanup at '{}'",
        tick_interval.as_secs(),
        cleanup_config.cron
    );

    Ok(scheduler)
}
