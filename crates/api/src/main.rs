//! CrmBridge - HubSpot CRM integration service
//!
//! Main entry point: loads configuration, wires the access façade, and runs
//! the background sync schedulers until interrupted.

use crmbridge_api::AppContext;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "Loaded .env file"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = crmbridge_infra::config::load()?;
    let mut ctx = AppContext::new(config)?;
    info!("CrmBridge initialized");

    if let Some(scheduler) = ctx.sync_scheduler.as_mut() {
        scheduler.start().await?;
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    if let Some(scheduler) = ctx.sync_scheduler.as_mut() {
        if scheduler.is_running() {
            scheduler.stop().await?;
        }
    }

    info!("CrmBridge stopped");
    Ok(())
}
