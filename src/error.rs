use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// All of these are fatal at startup: the watcher is never started.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("inbound directory does not exist: {}", path.display())]
    InboundMissing { path: PathBuf },

    #[error("unknown exchange '{name}' for account '{account}'")]
    UnknownVenue { name: String, account: String },
}

/// Failure to construct an account client for a venue.
///
/// Non-fatal: the rule that needs the client is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("unknown venue '{name}'")]
    Unknown { name: String },

    #[error("failed to construct client for {venue}: {reason}")]
    Construction { venue: String, reason: String },
}

/// Failure of a balance or position query.
///
/// Non-fatal: the rule being evaluated does not pass.
#[derive(Error, Debug)]
pub enum GateError {
    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("venue rejected request ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode venue response: {0}")]
    Decode(String),
}

/// Failure to move a file out of the inbound directory.
///
/// Non-fatal: the file stays where it is and the event loop continues.
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("source file vanished before it could be moved: {}", path.display())]
    SourceVanished { path: PathBuf },

    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error returned by startup and the CLI.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
