//! Logger configuration
//!
//! A `LoggerConfig` can be built in code or loaded from `~/.trail/logger.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Default size threshold for `Logger::is_over_size_limit` (1 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

const CONFIG_FILE: &str = "logger.toml";

/// Configuration applied by `Logger::configure`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Most verbose level still emitted. `None` ("off") silences the logger.
    #[serde(default = "default_level", with = "level_or_off")]
    pub level: Option<LogLevel>,

    /// Log file path. The extension, if any, is dropped when the file is attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Echo every emitted line to the console
    #[serde(default = "default_echo_to_console")]
    pub echo_to_console: bool,

    /// Size above which the log file is reported as over the limit
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_level() -> Option<LogLevel> {
    Some(LogLevel::Debug)
}

fn default_echo_to_console() -> bool {
    true
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            path: None,
            echo_to_console: default_echo_to_console(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl LoggerConfig {
    /// Console-only configuration at the given level
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    /// Configuration that emits nothing
    pub fn silent() -> Self {
        Self {
            level: None,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_echo(mut self, echo_to_console: bool) -> Self {
        self.echo_to_console = echo_to_console;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read logger config {}", path.display()))?;
        let mut config: Self = toml::from_str(&content).context("Failed to parse logger config")?;
        config.path = config.path.map(|p| expand_path(&p));
        Ok(config)
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Get the base configuration directory (~/.trail)
/// Falls back to ./.trail if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".trail")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".trail"))
}

/// Get the path to the logger config file
pub fn config_file_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Level names in config files, with "off" standing for no level
mod level_or_off {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::logging::LogLevel;

    pub fn serialize<S: Serializer>(level: &Option<LogLevel>, s: S) -> Result<S::Ok, S::Error> {
        match level {
            Some(level) => s.serialize_str(&level.as_str().to_ascii_lowercase()),
            None => s.serialize_str("off"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LogLevel>, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(None),
            _ => raw.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
