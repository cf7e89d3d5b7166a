//! # CrmBridge Domain
//!
//! Domain types and models shared across the integration layer.
//!
//! This crate contains:
//! - The generic CRM record envelope and pagination types
//! - Property schema types as returned by the remote metadata API
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other crmbridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
