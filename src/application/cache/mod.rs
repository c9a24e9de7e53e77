//! Runtime caches.

mod connection;

pub use connection::ConnectionCache;
