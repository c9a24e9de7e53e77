//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters to route
//! one inbound file: [`Router`] decides, [`FileMover`] executes.

pub mod cache;
pub mod gate;
pub mod mover;
pub mod router;

pub use cache::ConnectionCache;
pub use gate::{AccountGate, GatePass};
pub use mover::FileMover;
pub use router::Router;
