//! Venue and account identifier types with proper encapsulation.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Venue identifier - newtype for type safety.
///
/// Always stored lowercase so `Binance` and `binance` name the same venue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VenueId(String);

impl VenueId {
    /// Create a new `VenueId`, normalising case and surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the venue name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// API key / secret pair for one account on one venue.
///
/// Immutable once loaded. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Short, log-safe form of the api key (first four characters).
    #[must_use]
    pub fn key_hint(&self) -> String {
        let prefix: String = self.api_key.chars().take(4).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.key_hint())
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// One account on one venue; the connection cache key.
///
/// Equality and hashing use the venue and the api key only. Two identities
/// with the same key but different secrets are a configuration error, not
/// two distinct accounts.
#[derive(Debug, Clone)]
pub struct VenueIdentity {
    venue: VenueId,
    credentials: Credentials,
}

impl VenueIdentity {
    pub fn new(venue: impl Into<VenueId>, credentials: Credentials) -> Self {
        Self {
            venue: venue.into(),
            credentials,
        }
    }

    #[must_use]
    pub const fn venue(&self) -> &VenueId {
        &self.venue
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl PartialEq for VenueIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.venue == other.venue && self.credentials.api_key == other.credentials.api_key
    }
}

impl Eq for VenueIdentity {}

impl Hash for VenueIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.venue.hash(state);
        self.credentials.api_key.hash(state);
    }
}

impl fmt::Display for VenueIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.venue, self.credentials.key_hint())
    }
}
