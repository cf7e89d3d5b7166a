//! # CrmBridge Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The retrying HTTP client and bearer-token auth
//! - The HubSpot object gateway (implements `crmbridge_core::ObjectGateway`)
//! - Configuration loading (environment first, file fallback)
//! - Cron-driven sync scheduling
//!
//! ## Architecture
//! - Implements traits defined in `crmbridge-core`
//! - Depends on `crmbridge-domain` and `crmbridge-core`
//! - Contains all "impure" code (network I/O, environment, clocks)

pub mod auth;
pub mod config;
pub mod gateway;
pub mod http;
pub mod scheduling;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use gateway::HubSpotGateway;
pub use http::HttpClient;
pub use scheduling::{SchedulerError, SchedulerResult, SyncScheduler, SyncSchedulerConfig};
