//! Inbound (driving) ports consumed by inbound adapters.
//!
//! # Modules
//!
//! - [`watch`]: File-creation event source for the inbound directory

pub mod watch;
