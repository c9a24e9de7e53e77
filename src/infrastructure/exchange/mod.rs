//! Venue abstraction layer.
//!
//! ## Adding a New Venue
//!
//! 1. Create a module under `adapter/outbound/<name>/`
//! 2. Implement [`crate::port::AccountClient`]
//! 3. Register a constructor in [`VenueRegistry::with_defaults`]

mod registry;

pub use registry::{VenueConstructor, VenueRegistry};
