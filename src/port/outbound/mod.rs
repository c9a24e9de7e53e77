//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! The only outbound dependency is the venue account API.

pub mod venue;
