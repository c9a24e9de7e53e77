//! Registry of known venues.
//!
//! Maps a venue name from configuration to the function that builds an
//! [`AccountClient`] for it. Names are looked up explicitly; an unknown name
//! is rejected when the rule set is built, not when the first file arrives.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::adapter::outbound::binance;
use crate::domain::{VenueId, VenueIdentity};
use crate::error::VenueError;
use crate::port::{AccountClient, ClientOptions};

/// Builds a client for one identity.
pub type VenueConstructor = Arc<
    dyn Fn(&VenueIdentity, &ClientOptions) -> Result<Arc<dyn AccountClient>, VenueError>
        + Send
        + Sync,
>;

/// Venue name → constructor.
#[derive(Clone, Default)]
pub struct VenueRegistry {
    constructors: BTreeMap<VenueId, VenueConstructor>,
}

impl VenueRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in venue.
    ///
    /// `binance` and `binanceusdm` both address USDⓈ-M futures on mainnet;
    /// `binanceusdm-testnet` addresses the futures testnet.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("binance", binance::connect_mainnet);
        registry.register("binanceusdm", binance::connect_mainnet);
        registry.register("binanceusdm-testnet", binance::connect_testnet);
        registry
    }

    /// Register (or replace) a constructor under `name`.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&VenueIdentity, &ClientOptions) -> Result<Arc<dyn AccountClient>, VenueError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(VenueId::new(name), Arc::new(constructor));
    }

    #[must_use]
    pub fn contains(&self, venue: &VenueId) -> bool {
        self.constructors.contains_key(venue)
    }

    /// Registered venue names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(VenueId::as_str)
    }

    /// Build a client for `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Unknown`] if the venue is not registered, or
    /// whatever the constructor returns.
    pub fn construct(
        &self,
        identity: &VenueIdentity,
        options: &ClientOptions,
    ) -> Result<Arc<dyn AccountClient>, VenueError> {
        let constructor =
            self.constructors
                .get(identity.venue())
                .ok_or_else(|| VenueError::Unknown {
                    name: identity.venue().to_string(),
                })?;
        constructor(identity, options)
    }
}

impl fmt::Debug for VenueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
