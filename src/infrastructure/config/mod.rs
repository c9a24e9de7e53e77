//! Infrastructure configuration modules.

pub mod logging;
pub mod nested;
pub mod settings;

pub use logging::LoggingConfig;
pub use nested::{ExchangeCredentialsConfig, NestedConfig};
pub use settings::{Config, HttpConfig};
