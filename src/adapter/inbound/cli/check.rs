//! Handler for the `check` command.

use std::collections::HashSet;

use crate::adapter::inbound::cli::command::CheckArgs;
use crate::adapter::inbound::cli::output;
use crate::application::ConnectionCache;
use crate::domain::{RuleSet, VenueIdentity};
use crate::error::{GateError, Result};
use crate::infrastructure::bootstrap::build_rule_set;
use crate::infrastructure::config::Config;
use crate::infrastructure::exchange::VenueRegistry;

/// Validate the configuration file without starting the watcher.
///
/// Fails on anything that would stop `run` at startup. Missing destination
/// directories are only warned about, since moves into them fail per file.
pub async fn execute(args: &CheckArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let registry = VenueRegistry::with_defaults();
    let rules = build_rule_set(&config, &registry)?;

    output::section("Configuration Check");
    output::field("Config", args.config.display());
    output::success("Configuration file is valid");

    output::section("Directories");
    output::field("Inbound", config.inbound.display());
    output::field("Fallback", config.fallback.display());
    config.ensure_inbound()?;
    output::success("Inbound directory exists");
    for missing in config.missing_destinations() {
        output::warning(format!("Destination does not exist: {}", missing.display()));
    }

    output::section("Rules");
    if rules.is_empty() {
        output::warning("No rules configured, every file goes to the fallback directory");
    }
    for (index, rule) in rules.iter().enumerate() {
        let pattern = rule.pattern().unwrap_or("<disabled>");
        output::field(
            &format!("#{}", index + 1),
            format!(
                "{pattern} -> {} ({}, {})",
                rule.destination().display(),
                rule.account_label(),
                rule.identity()
            ),
        );
    }

    if args.connect {
        check_connections(&config, registry, &rules).await?;
    }

    output::success("Configuration check complete");
    Ok(())
}

/// Fetch the balance of every distinct account once.
async fn check_connections(config: &Config, registry: VenueRegistry, rules: &RuleSet) -> Result<()> {
    output::section("Accounts");

    let cache = ConnectionCache::new(registry, config.client_options());
    let mut seen: HashSet<&VenueIdentity> = HashSet::new();
    let mut first_failure: Option<GateError> = None;

    for rule in rules.iter() {
        if !seen.insert(rule.identity()) {
            continue;
        }

        let result = match cache.client(rule.identity()) {
            Ok(client) => client.fetch_balance().await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(balances) => {
                let total = balances
                    .get(rule.quote_asset())
                    .map(|b| b.total)
                    .unwrap_or_default();
                output::success(format!(
                    "{}: {total} {}",
                    rule.account_label(),
                    rule.quote_asset()
                ));
            }
            Err(e) => {
                output::error(format!("{}: {e}", rule.account_label()));
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
