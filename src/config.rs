//! Client runtime configuration.
//!
//! Resolved once at process startup and passed into the app, so nothing reads
//! environment variables after the terminal is initialised.

use std::path::PathBuf;

/// Backend used when `TRIAGE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// HTTP timeout used when `TRIAGE_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file used when `TRIAGE_LOG_FILE` is not set.
pub const DEFAULT_LOG_FILE: &str = "triage.log";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be an http:// or https:// URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be true/false, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },

    #[error("{name} must be one of auto, file, stdout; got {value:?}")]
    InvalidLogMode { name: &'static str, value: String },
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns the screen), stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Whether logs should go to the file, given whether stdout is a TTY.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Configuration resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    pub timeout_secs: u64,
    /// Use the built-in mock backend instead of HTTP
    pub mock: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mock: false,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup` (a variable name to value map).
    ///
    /// # Errors
    /// Returns error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("TRIAGE_API_URL") {
            let url = value.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    name: "TRIAGE_API_URL",
                    value,
                });
            }
            config.api_url = url.to_string();
        }

        if let Some(value) = lookup("TRIAGE_TIMEOUT_SECS") {
            config.timeout_secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or(ConfigError::InvalidNumber {
                    name: "TRIAGE_TIMEOUT_SECS",
                    value,
                })?;
        }

        if let Some(value) = lookup("TRIAGE_MOCK") {
            config.mock = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: "TRIAGE_MOCK",
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup("TRIAGE_LOG_MODE") {
            config.log_mode = match value.trim().to_ascii_lowercase().as_str() {
                "auto" | "" => LogMode::Auto,
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                _ => {
                    return Err(ConfigError::InvalidLogMode {
                        name: "TRIAGE_LOG_MODE",
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup("TRIAGE_LOG_FILE") {
            if !value.trim().is_empty() {
                config.log_file = PathBuf::from(value.trim());
            }
        }

        Ok(config)
    }
}
