//! Configuration types.
//!
//! Every field has a default, so an absent or partial config file is fine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the account snapshot is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the JSON account snapshot.
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
        }
    }
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("tg-snapshot.json")
}

/// Location and lifetime of the client session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session file.
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,

    /// Session file name inside `dir`.
    #[serde(default = "default_session_file")]
    pub file: String,

    /// Sessions older than this many days are removed before a run.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
            file: default_session_file(),
            ttl_days: default_ttl_days(),
        }
    }
}

fn default_session_dir() -> PathBuf {
    PathBuf::from(".tempts")
}

fn default_session_file() -> String {
    "tg.session".to_string()
}

const fn default_ttl_days() -> u32 {
    7
}

/// Default output file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Used when `--json` is given without a file name.
    #[serde(default = "default_json_file")]
    pub json_file: PathBuf,

    /// Used when `--text` is given without a file name.
    #[serde(default = "default_text_file")]
    pub text_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_file: default_json_file(),
            text_file: default_text_file(),
        }
    }
}

fn default_json_file() -> PathBuf {
    PathBuf::from("tgf-list.json")
}

fn default_text_file() -> PathBuf {
    PathBuf::from("tgf-list.txt")
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Default location of the config file.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tgfolder-export")
            .join("config.toml")
    }

    /// Full path of the session file.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.session.dir.join(&self.session.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source.snapshot, PathBuf::from("tg-snapshot.json"));
        assert_eq!(config.session.ttl_days, 7);
        assert_eq!(config.output.json_file, PathBuf::from("tgf-list.json"));
        assert_eq!(config.output.text_file, PathBuf::from("tgf-list.txt"));
    }

    #[test]
    fn test_session_path() {
        let config = AppConfig::default();
        assert_eq!(config.session_path(), PathBuf::from(".tempts/tg.session"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str("[session]\nttl_days = 3\n").unwrap();
        assert_eq!(config.session.ttl_days, 3);
        assert_eq!(config.session.file, "tg.session");
        assert_eq!(config.output.json_file, PathBuf::from("tgf-list.json"));
    }
}
