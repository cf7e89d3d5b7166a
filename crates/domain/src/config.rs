//! Configuration structures consumed by the integration layer.

use serde::{Deserialize, Serialize};

use crate::types::ObjectKind;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub hubspot: HubSpotApiConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Remote API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubSpotApiConfig {
    /// Base URL, e.g. `https://api.hubapi.com`.
    pub base_url: String,
    /// Private app token / API key sent as a bearer credential.
    pub api_key: String,
    /// Request (read) timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

/// Settings for the background synchronization schedulers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Object kind reconciled by the schedulers.
    #[serde(default = "default_sync_kind")]
    pub kind: ObjectKind,
    /// Cron expression for the full paginated sweep.
    #[serde(default = "default_full_sync_cron")]
    pub full_sync_cron: String,
    /// Cron expression for the incremental watermark sweep.
    #[serde(default = "default_incremental_cron")]
    pub incremental_cron: String,
    /// Lookback window for the incremental watermark, in hours.
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: i64,
    /// Page size used by both sweeps.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: default_sync_kind(),
            full_sync_cron: default_full_sync_cron(),
            incremental_cron: default_incremental_cron(),
            lookback_hours: default_lookback_hours(),
            page_limit: default_page_limit(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_sync_kind() -> ObjectKind {
    ObjectKind::Companies
}

fn default_full_sync_cron() -> String {
    // Daily at midnight.
    "0 0 0 * * *".to_string()
}

fn default_incremental_cron() -> String {
    // Every minute.
    "0 * * * * *".to_string()
}

fn default_lookback_hours() -> i64 {
    48
}

fn default_page_limit() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_config_defaults_apply_when_section_is_missing() {
        let json = r#"{"hubspot": {"base_url": "https://api.hubapi.com", "api_key": "secret"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.sync.enabled);
        assert_eq!(config.sync.kind, ObjectKind::Companies);
        assert_eq!(config.sync.lookback_hours, 48);
        assert_eq!(config.sync.page_limit, 100);
        assert_eq!(config.hubspot.timeout_ms, 30_000);
    }

    #[test]
    fn sync_kind_accepts_kebab_case_values() {
        let json = r#"{
            "hubspot": {"base_url": "u", "api_key": "k"},
            "sync": {"kind": "line-items"}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.sync.kind, ObjectKind::LineItems);
    }
}
