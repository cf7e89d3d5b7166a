//! Per-kind property schema caching.

pub mod properties;

pub use properties::PropertyCache;
