//! Application context - dependency injection container

use std::sync::Arc;

use chrono::Duration;
use crmbridge_core::{SyncWorker, SyncWorkerConfig};
use crmbridge_domain::{Config, Result};
use crmbridge_infra::scheduling::{SyncScheduler, SyncSchedulerConfig};
use crmbridge_infra::{HubSpotGateway, StaticTokenProvider};
use tracing::info;

use crate::facade::CrmFacade;

/// Application context - holds the façade and background scheduling.
pub struct AppContext {
    pub config: Config,
    pub facade: CrmFacade,
    /// Present only when background sync is enabled in the configuration.
    pub sync_scheduler: Option<SyncScheduler>,
}

impl AppContext {
    /// Wire the gateway, façade, and (optionally) the sync scheduler.
    pub fn new(config: Config) -> Result<Self> {
        let auth = Arc::new(StaticTokenProvider::new(config.hubspot.api_key.clone()));
        let gateway = Arc::new(HubSpotGateway::new(&config.hubspot, auth)?);
        let facade = CrmFacade::new(gateway);

        let sync_scheduler = if config.sync.enabled {
            let worker_config = SyncWorkerConfig {
                lookback: Duration::hours(config.sync.lookback_hours),
                page_limit: config.sync.page_limit,
            };
            let worker =
                Arc::new(SyncWorker::new(facade.service_for(config.sync.kind), worker_config));
            let scheduler =
                SyncScheduler::new(worker, SyncSchedulerConfig::from_sync_config(&config.sync));
            info!(kind = %config.sync.kind, "Background sync configured");
            Some(scheduler)
        } else {
            info!("Background sync disabled by configuration");
            None
        };

        Ok(Self { config, facade, sync_scheduler })
    }
}
