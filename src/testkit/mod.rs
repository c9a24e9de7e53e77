//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`venue`] - Scripted [`AccountClient`](crate::port::AccountClient)s and
//!   registries that count constructions.
//! - [`watch`] - Mock [`FileWatcher`](crate::port::FileWatcher)s:
//!   `ScriptedWatcher`, `ChannelWatcher`.
//! - [`config`] - Temporary `in/`/`out/` layouts and config files.

pub mod config;
pub mod venue;
pub mod watch;
