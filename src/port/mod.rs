//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────────┐     ┌──────────────────────┐     ┌───────────────┐
//!   │ FileWatcher  │ ──▶ │ Router + FileMover   │ ──▶ │ AccountClient │
//!   │  (inbound)   │     │    (application)     │     │  (outbound)   │
//!   └──────────────┘     └──────────────────────┘     └───────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`FileWatcher`] - Creation events for the inbound directory
//! - [`AccountClient`] - Balance and position queries against a venue

pub mod inbound;
pub mod outbound;

pub use inbound::watch::{FileEvent, FileWatcher};
pub use outbound::venue::{
    AccountClient, AssetBalance, BalanceSheet, ClientOptions, OpenPosition,
};
