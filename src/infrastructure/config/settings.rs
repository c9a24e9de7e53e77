//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct. Configuration is loaded from a TOML
//! file; account secrets may be pulled from environment variables.
//!
//! # Example
//!
//! ```no_run
//! use dropgate::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::nested::NestedConfig;
use crate::error::{ConfigError, Result};
use crate::port::ClientOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Watched inbound directory. Must exist.
    #[serde(rename = "in")]
    pub inbound: PathBuf,
    /// Fallback directory for files no rule accepts.
    #[serde(rename = "out")]
    pub fallback: PathBuf,
    /// Wait between a creation event and classification.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Directory scan interval for the polling watcher.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Route files already present when the watcher starts.
    #[serde(default)]
    pub sweep_existing: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// Ordered routing rules; earlier entries win.
    #[serde(default)]
    pub nested: Vec<NestedConfig>,
}

const fn default_settle_delay_ms() -> u64 {
    1000
}

const fn default_poll_interval_ms() -> u64 {
    500
}

/// HTTP settings shared by all venue clients.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_recv_window_ms() -> u64 {
    5_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            recv_window_ms: default_recv_window_ms(),
        }
    }
}

impl From<HttpConfig> for ClientOptions {
    fn from(config: HttpConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            recv_window: Duration::from_millis(config.recv_window_ms),
        }
    }
}

impl Config {
    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        for nested in &mut config.nested {
            nested.exchange_config.resolve_env();
            // Symbols are scanned in upper case only.
            nested.quote_asset = nested.quote_asset.trim().to_ascii_uppercase();
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.inbound.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "in" }.into());
        }
        if self.fallback.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "out" }.into());
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        for nested in &self.nested {
            if nested.path.as_os_str().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "nested.path",
                }
                .into());
            }
            if nested.exchange_name.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "nested.exchange_name",
                }
                .into());
            }
            if nested.quote_asset.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "nested.quote_asset",
                    reason: format!("empty quote asset for account '{}'", nested.label()),
                }
                .into());
            }
            nested.exchange_config.credentials()?;
        }

        Ok(())
    }

    /// Check that the inbound directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InboundMissing`] otherwise.
    pub fn ensure_inbound(&self) -> Result<()> {
        if self.inbound.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::InboundMissing {
                path: self.inbound.clone(),
            }
            .into())
        }
    }

    /// Destination and fallback directories that do not exist.
    #[must_use]
    pub fn missing_destinations(&self) -> Vec<&Path> {
        std::iter::once(self.fallback.as_path())
            .chain(self.nested.iter().map(|n| n.path.as_path()))
            .filter(|path| !path.is_dir())
            .collect()
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        self.http.into()
    }
}
