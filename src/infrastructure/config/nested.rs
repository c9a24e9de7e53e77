//! Routing rule entries (`[[nested]]`).

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{Credentials, DEFAULT_QUOTE_ASSET};
use crate::error::ConfigError;

/// One `[[nested]]` entry: a destination directory and the account gating it.
#[derive(Debug, Clone, Deserialize)]
pub struct NestedConfig {
    /// Destination directory.
    pub path: PathBuf,
    /// Regex matched from the start of the file name. Empty disables the rule.
    #[serde(default)]
    pub matching: String,
    pub exchange_name: String,
    /// Label used in logs only.
    #[serde(default)]
    pub account_name: String,
    /// Asset whose balance must be positive; also the symbol suffix.
    /// Upper-cased on load.
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
    pub exchange_config: ExchangeCredentialsConfig,
}

fn default_quote_asset() -> String {
    DEFAULT_QUOTE_ASSET.to_string()
}

/// Credentials for one account.
///
/// The secret may be given inline or read from the environment variable named
/// by `api_secret_env`; the inline value wins when both are present.
#[derive(Clone, Default, Deserialize)]
pub struct ExchangeCredentialsConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub api_secret_env: Option<String>,
}

impl std::fmt::Debug for ExchangeCredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeCredentialsConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("api_secret_env", &self.api_secret_env)
            .finish()
    }
}

impl ExchangeCredentialsConfig {
    /// Fill `api_secret` from `api_secret_env` when it was not given inline.
    pub(super) fn resolve_env(&mut self) {
        if self.api_secret.is_some() {
            return;
        }
        if let Some(var) = &self.api_secret_env {
            self.api_secret = std::env::var(var).ok();
        }
    }

    /// Build validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the key or secret is absent.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchange_config.api_key",
            });
        }
        let secret = self
            .api_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingField {
                field: "exchange_config.api_secret",
            })?;
        Ok(Credentials::new(self.api_key.trim(), secret))
    }
}

impl NestedConfig {
    /// Label for diagnostics: the account name, or the exchange when unnamed.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.account_name.is_empty() {
            &self.exchange_name
        } else {
            &self.account_name
        }
    }
}
