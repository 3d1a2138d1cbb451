//! Configuration loading.
//!
//! Merges the TOML config file, `.env`/environment overrides and defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Environment variable overriding `[source] snapshot`.
pub const SNAPSHOT_ENV: &str = "TGF_SNAPSHOT";

/// Loads configuration.
///
/// An explicit `path` must exist; the default location is optional.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let mut config = match path {
        Some(path) if !path.exists() => {
            return Err(AppError::Config {
                message: format!("Config file not found: {}", path.display()),
            });
        }
        Some(path) => load_config_from_file(path)?,
        None => {
            let default_path = AppConfig::default_config_path();
            if default_path.exists() {
                load_config_from_file(&default_path)?
            } else {
                AppConfig::default()
            }
        }
    };

    if let Some(snapshot) = std::env::var_os(SNAPSHOT_ENV).filter(|v| !v.is_empty()) {
        tracing::debug!("Snapshot path taken from {SNAPSHOT_ENV}");
        config.source.snapshot = PathBuf::from(snapshot);
    }

    Ok(config)
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let config = toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}
