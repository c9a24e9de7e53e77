//! Dropgate - routes files dropped into a directory by rule and account state.
//!
//! Files appearing in an inbound directory are classified against an ordered
//! list of rules. A rule accepts a file when its pattern matches the start of
//! the file name, the rule's venue account holds a positive balance of the
//! quote asset, and that account has no open position on the symbol encoded
//! in the file name. The first accepting rule wins; otherwise the file goes to
//! the fallback directory.
//!
//! # Modules
//!
//! - [`domain`] - Rules, venue identities, symbol extraction, route decisions
//! - [`port`] - Traits for venue account clients and file watchers
//! - [`application`] - Router, account gate, connection cache, file mover
//! - [`adapter`] - Binance account client, polling watcher, CLI
//! - [`infrastructure`] - Configuration, venue registry, wiring, run loop
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use dropgate::infrastructure::config::Config;
//! use dropgate::infrastructure::exchange::VenueRegistry;
//! use dropgate::infrastructure::orchestration::run_with_shutdown;
//!
//! # async fn example() -> dropgate::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let (_tx, rx) = tokio::sync::watch::channel(false);
//! let summary = run_with_shutdown(config, VenueRegistry::with_defaults(), rx).await?;
//! println!("moved {} files", summary.moved());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
