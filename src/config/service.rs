//! Remote service configuration.
//!
//! The script URL and request timeout come from an optional `config.toml` and can be
//! overridden by environment variables (usually set in `.env`):
//!
//! - `ATTENDANCE_CONFIG` - path of the TOML file (default `config.toml`)
//! - `ATTENDANCE_SCRIPT_URL` - deployed web app URL
//! - `ATTENDANCE_TIMEOUT_SECS` - request timeout in seconds (default 30)

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Structure of the whole config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// `[service]` table
    #[serde(default)]
    pub service: ServiceSection,
}

/// The `[service]` table as written in the file; every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServiceSection {
    /// Deployed web app URL
    pub script_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Resolved settings for reaching the attendance service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Web app URL all actions are sent to
    pub script_url: Url,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Combines the file settings with environment overrides.
///
/// Environment values win over the file. A missing or unparseable URL is an error; an
/// unparseable timeout falls back to the file value, then to the default.
pub fn resolve(
    file: &ServiceSection,
    env_script_url: Option<String>,
    env_timeout_secs: Option<String>,
) -> Result<ServiceConfig> {
    let raw_url = env_script_url
        .filter(|s| !s.trim().is_empty())
        .or_else(|| file.script_url.clone())
        .ok_or_else(|| Error::Config {
            message: "No script URL configured. Set ATTENDANCE_SCRIPT_URL or [service].script_url"
                .to_string(),
        })?;

    let script_url = Url::parse(raw_url.trim()).map_err(|e| Error::Config {
        message: format!("Invalid script URL '{raw_url}': {e}"),
    })?;

    let timeout_secs = env_timeout_secs
        .and_then(|s| s.trim().parse().ok())
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ServiceConfig {
        script_url,
        timeout_secs,
    })
}

/// Loads the service configuration from the file named by `ATTENDANCE_CONFIG` (or
/// `config.toml`) and the environment. A missing file is not an error.
pub fn load_service_config() -> Result<ServiceConfig> {
    let path =
        std::env::var("ATTENDANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let file = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        tracing::info!("No configuration file at {}, using environment only", path);
        Config::default()
    };

    let config = resolve(
        &file.service,
        std::env::var("ATTENDANCE_SCRIPT_URL").ok(),
        std::env::var("ATTENDANCE_TIMEOUT_SECS").ok(),
    )?;
    tracing::info!(
        "Attendance service at {} (timeout {}s)",
        config.script_url.host_str().unwrap_or("<no host>"),
        config.timeout_secs
    );
    Ok(config)
}
