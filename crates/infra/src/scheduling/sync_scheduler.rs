//! Cron-driven scheduler for the full and incremental sync sweeps.
//!
//! Registers two cron jobs on a shared [`JobScheduler`]: a full paginated
//! sweep (daily by default) and an incremental watermark sweep (every minute
//! by default). Join handles are tracked, cancellation is explicit, and every
//! job execution is wrapped in a timeout.
//!
//! A failing run is logged and the scheduler keeps going; the next tick
//! starts fresh.

use std::sync::Arc;
use std::time::Duration;

use crmbridge_core::SyncWorker;
use crmbridge_domain::SyncConfig;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Configuration for the sync scheduler.
#[derive(Debug, Clone)]
pub struct SyncSchedulerConfig {
    /// Cron expression for the full paginated sweep.
    pub full_sync_cron: String,
    /// Cron expression for the incremental watermark sweep.
    pub incremental_cron: String,
    /// Timeout applied to a single sweep execution.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for SyncSchedulerConfig {
    fn default() -> Self {
        Self {
            full_sync_cron: "0 0 0 * * *".into(),   // daily at midnight
            incremental_cron: "0 * * * * *".into(), // every minute
            job_timeout: Duration::from_secs(300),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

impl SyncSchedulerConfig {
    /// Derive scheduler settings from the application sync configuration.
    pub fn from_sync_config(config: &SyncConfig) -> Self {
        Self {
            full_sync_cron: config.full_sync_cron.clone(),
            incremental_cron: config.incremental_cron.clone(),
            ..Default::default()
        }
    }
}

/// Sync scheduler with explicit lifecycle management.
pub struct SyncScheduler {
    scheduler: Option<JobScheduler>,
    config: SyncSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    worker: Arc<SyncWorker>,
}

impl SyncScheduler {
    /// Create a scheduler around a sync worker.
    pub fn new(worker: Arc<SyncWorker>, config: SyncSchedulerConfig) -> Self {
        Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            worker,
        }
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);

        let cancel = self.cancellation.clone();
        let handle = tokio::spawn(async move {
            Self::monitor_task(cancel).await;
        });

        self.monitor_handle = Some(handle);
        info!(kind = %self.worker.kind(), "Sync scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let mut scheduler = match self.scheduler.take() {
            Some(scheduler) => scheduler,
            None => return Err(SchedulerError::NotRunning),
        };

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??
        }

        info!("Sync scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;

        self.register_job(&scheduler, &self.config.full_sync_cron, SweepKind::Full).await?;
        self.register_job(&scheduler, &self.config.incremental_cron, SweepKind::Incremental)
            .await?;

        Ok(scheduler)
    }

    async fn register_job(
        &self,
        scheduler: &JobScheduler,
        cron_expr: &str,
        sweep: SweepKind,
    ) -> SchedulerResult<()> {
        let worker = Arc::clone(&self.worker);
        let job_timeout = self.config.job_timeout;

        let job_definition = Job::new_async(cron_expr, move |_id, _lock| {
            let worker = worker.clone();
            Box::pin(async move {
                Self::execute_sweep(&worker, sweep, job_timeout).await;
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %cron_expr, sweep = sweep.as_str(), job_id = %job_id, "Registered sync job");
        Ok(())
    }

    /// Per-run boundary: a failing or timed-out sweep is logged and
    /// swallowed so the cron schedule keeps ticking.
    async fn execute_sweep(worker: &SyncWorker, sweep: SweepKind, job_timeout: Duration) {
        match tokio::time::timeout(job_timeout, Self::run_sweep(worker, sweep)).await {
            Ok(Ok(())) => {
                debug!(sweep = sweep.as_str(), "Sync sweep finished successfully");
            }
            Ok(Err(err)) => {
                error!(sweep = sweep.as_str(), error = %err, "Sync sweep failed");
            }
            Err(elapsed) => {
                warn!(
                    sweep = sweep.as_str(),
                    timeout_secs = job_timeout.as_secs(),
                    "Sync sweep timed out"
                );
                debug!(elapsed = ?elapsed, "Timeout details");
            }
        }
    }

    async fn run_sweep(worker: &SyncWorker, sweep: SweepKind) -> crmbridge_domain::Result<()> {
        match sweep {
            SweepKind::Full => {
                let report = worker.run_full_sync().await?;
                info!(pages = report.pages, records = report.records, "Full sweep completed");
            }
            SweepKind::Incremental => {
                let report = worker.run_incremental_sync().await?;
                info!(
                    records = report.records,
                    watermark = %report.watermark,
                    "Incremental sweep completed"
                );
            }
        }
        Ok(())
    }

    async fn monitor_task(cancel: CancellationToken) {
        cancel.cancelled().await;
        debug!("Sync scheduler monitor cancelled");
    }
}

#[derive(Debug, Copy, Clone)]
enum SweepKind {
    Full,
    Incremental,
}

impl SweepKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Incremental => "incremental",
        }
    }
}

/// Ensure background tasks are cancelled when the scheduler is dropped.
impl Drop for SyncScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("SyncScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
