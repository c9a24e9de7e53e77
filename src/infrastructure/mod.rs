//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! routing logic: configuration, the venue registry and runtime wiring.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`exchange`] - Venue registry
//! - [`orchestration`] - Runtime event loop

pub mod bootstrap;
pub mod config;
pub mod exchange;
pub mod orchestration;
