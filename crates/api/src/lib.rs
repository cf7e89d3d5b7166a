//! # CrmBridge API
//!
//! Application layer: the CRM access façade and process wiring.
//!
//! This crate contains:
//! - [`CrmFacade`]: the single kind-dispatching entry point callers use
//! - [`AppContext`]: dependency injection for the binary
//! - The service entry point (`src/main.rs`)
//!
//! ## Architecture
//! - Depends on `crmbridge-domain`, `crmbridge-core`, and `crmbridge-infra`
//! - Wires the gateway and schema cache into the per-kind services

pub mod context;
pub mod facade;

pub use context::AppContext;
pub use facade::CrmFacade;
