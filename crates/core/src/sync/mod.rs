//! Full and incremental reconciliation against the remote system.

pub mod watermark;
pub mod worker;

pub use watermark::{incremental_filter, watermark_value, LAST_MODIFIED_PROPERTY};
pub use worker::{FullSyncReport, IncrementalSyncReport, SyncWorker, SyncWorkerConfig};
