//! Composition root: turns a [`Config`] into live components.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::inbound::watch::PollingWatcher;
use crate::application::{AccountGate, ConnectionCache, FileMover, Router};
use crate::domain::{Rule, RuleSet, VenueId, VenueIdentity};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;
use crate::infrastructure::exchange::VenueRegistry;

/// Build the ordered rule set from `nested`, in file order.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownVenue`] for an exchange the registry does not
/// know, [`ConfigError::InvalidValue`] for a pattern that is not a valid
/// regex, and [`ConfigError::MissingField`] for incomplete credentials.
pub fn build_rule_set(config: &Config, registry: &VenueRegistry) -> Result<RuleSet> {
    let mut rules = Vec::with_capacity(config.nested.len());

    for nested in &config.nested {
        let venue = VenueId::new(&nested.exchange_name);
        if !registry.contains(&venue) {
            return Err(ConfigError::UnknownVenue {
                name: nested.exchange_name.clone(),
                account: nested.label().to_string(),
            }
            .into());
        }

        let identity = VenueIdentity::new(venue, nested.exchange_config.credentials()?);
        let rule = Rule::new(&nested.matching, &nested.path, identity, nested.label())
            .map_err(|e| ConfigError::InvalidValue {
                field: "nested.matching",
                reason: format!("account '{}': {e}", nested.label()),
            })?
            .with_quote_asset(nested.quote_asset.as_str());

        if rule.is_disabled() {
            warn!(account = nested.label(), "Empty pattern, rule will never match");
        }
        rules.push(rule);
    }

    Ok(RuleSet::new(rules))
}

/// Build the router and its connection cache.
///
/// # Errors
///
/// See [`build_rule_set`].
pub fn build_router(config: &Config, registry: VenueRegistry) -> Result<Router> {
    let rules = build_rule_set(config, &registry)?;
    info!(rules = rules.len(), "Rule set loaded");

    let cache = Arc::new(ConnectionCache::new(registry, config.client_options()));
    Ok(Router::new(Arc::new(rules), AccountGate::new(cache)))
}

#[must_use]
pub fn build_mover(config: &Config) -> FileMover {
    FileMover::new(&config.fallback)
}

/// Start the polling watcher on the inbound directory.
///
/// # Errors
///
/// Returns [`ConfigError::InboundMissing`] if the directory does not exist,
/// or an I/O error from the initial scan.
pub async fn build_watcher(config: &Config) -> Result<PollingWatcher> {
    config.ensure_inbound()?;
    let watcher =
        PollingWatcher::start(&config.inbound, config.poll_interval(), config.sweep_existing)
            .await?;
    Ok(watcher)
}
