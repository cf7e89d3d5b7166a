//! Watermark computation for incremental sync.
//!
//! The watermark is recomputed on every run as `now - lookback`; it is not
//! persisted across restarts.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

/// Remote property holding a record's last-modification instant.
pub const LAST_MODIFIED_PROPERTY: &str = "hs_lastmodifieddate";

/// Remote filter operator token for "greater than".
const GREATER_THAN: &str = "GT";

/// Format `now - lookback` as an ISO-8601 UTC timestamp with millisecond
/// precision, the shape the remote search endpoint expects.
pub fn watermark_value(now: DateTime<Utc>, lookback: Duration) -> String {
    (now - lookback).format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Build the single filter group selecting records modified after the
/// watermark.
pub fn incremental_filter(watermark: &str) -> Value {
    json!([
        {
            "filters": [
                {
                    "propertyName": LAST_MODIFIED_PROPERTY,
                    "operator": GREATER_THAN,
                    "value": watermark,
                }
            ]
        }
    ])
}
