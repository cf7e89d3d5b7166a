//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CRMBRIDGE_HUBSPOT_BASE_URL`: Remote API base URL (required)
//! - `CRMBRIDGE_HUBSPOT_API_KEY`: Private app token (required)
//! - `CRMBRIDGE_HUBSPOT_TIMEOUT_MS`: Request timeout in milliseconds
//! - `CRMBRIDGE_HUBSPOT_CONNECT_TIMEOUT_MS`: Connect timeout in milliseconds
//! - `CRMBRIDGE_SYNC_ENABLED`: Whether background sync runs (true/false)
//! - `CRMBRIDGE_SYNC_KIND`: Object kind reconciled by the schedulers
//! - `CRMBRIDGE_SYNC_FULL_CRON`: Cron expression for the full sweep
//! - `CRMBRIDGE_SYNC_INCREMENTAL_CRON`: Cron expression for the incremental sweep
//! - `CRMBRIDGE_SYNC_LOOKBACK_HOURS`: Incremental watermark lookback
//! - `CRMBRIDGE_SYNC_PAGE_LIMIT`: Page size for both sweeps
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./crmbridge.json` or `./crmbridge.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crmbridge_domain::{Config, CrmError, HubSpotApiConfig, ObjectKind, Result, SyncConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CrmError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The base URL and API key are required; everything else falls back to the
/// same defaults the serde layer applies to file-based configuration.
///
/// # Errors
/// Returns `CrmError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("CRMBRIDGE_HUBSPOT_BASE_URL")?;
    let api_key = env_var("CRMBRIDGE_HUBSPOT_API_KEY")?;

    let defaults = HubSpotApiConfig {
        base_url,
        api_key,
        timeout_ms: 30_000,
        connect_timeout_ms: 10_000,
    };
    let hubspot = HubSpotApiConfig {
        timeout_ms: env_parsed("CRMBRIDGE_HUBSPOT_TIMEOUT_MS", defaults.timeout_ms)?,
        connect_timeout_ms: env_parsed(
            "CRMBRIDGE_HUBSPOT_CONNECT_TIMEOUT_MS",
            defaults.connect_timeout_ms,
        )?,
        ..defaults
    };

    let sync_defaults = SyncConfig::default();
    let kind = match std::env::var("CRMBRIDGE_SYNC_KIND") {
        Ok(raw) => ObjectKind::from_str(&raw)
            .map_err(|e| CrmError::Config(format!("Invalid sync kind: {}", e)))?,
        Err(_) => sync_defaults.kind,
    };
    let sync = SyncConfig {
        enabled: env_bool("CRMBRIDGE_SYNC_ENABLED", sync_defaults.enabled),
        kind,
        full_sync_cron: std::env::var("CRMBRIDGE_SYNC_FULL_CRON")
            .unwrap_or(sync_defaults.full_sync_cron),
        incremental_cron: std::env::var("CRMBRIDGE_SYNC_INCREMENTAL_CRON")
            .unwrap_or(sync_defaults.incremental_cron),
        lookback_hours: env_parsed("CRMBRIDGE_SYNC_LOOKBACK_HOURS", sync_defaults.lookback_hours)?,
        page_limit: env_parsed("CRMBRIDGE_SYNC_PAGE_LIMIT", sync_defaults.page_limit)?,
    };

    Ok(Config { hubspot, sync })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CrmError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CrmError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CrmError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CrmError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, detecting the format from the
/// file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CrmError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parent levels, and the
/// executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("crmbridge.json"),
            cwd.join("crmbridge.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("crmbridge.json"),
                exe_dir.join("crmbridge.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CrmError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse a numeric environment variable, falling back to `default` when the
/// variable is unset.
fn env_parsed<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| CrmError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
