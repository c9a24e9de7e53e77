//! Connection cache for venue account clients.
//!
//! Holds at most one client per [`VenueIdentity`]. Entries are created on
//! first use and live for the rest of the process: there is no eviction,
//! expiry, health check or reconnect. A failed construction is stored as well
//! and returned to every later caller without calling the constructor again.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::VenueIdentity;
use crate::error::VenueError;
use crate::infrastructure::exchange::VenueRegistry;
use crate::port::{AccountClient, ClientOptions};

type Entry = Result<Arc<dyn AccountClient>, VenueError>;

/// Keyed store of live account clients.
pub struct ConnectionCache {
    registry: VenueRegistry,
    options: ClientOptions,
    entries: Mutex<HashMap<VenueIdentity, Entry>>,
}

impl ConnectionCache {
    #[must_use]
    pub fn new(registry: VenueRegistry, options: ClientOptions) -> Self {
        Self {
            registry,
            options,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the client for `identity`, constructing it on first use.
    ///
    /// The lock is held across construction so two callers can never build
    /// two clients for the same identity. Constructors are synchronous and
    /// do no network I/O.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`VenueError`] if construction failed.
    pub fn client(&self, identity: &VenueIdentity) -> Result<Arc<dyn AccountClient>, VenueError> {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(identity) {
            return entry.clone();
        }

        let entry = self.registry.construct(identity, &self.options);
        match &entry {
            Ok(_) => info!(identity = %identity, "Venue client created"),
            Err(e) => warn!(
                identity = %identity,
                error = %e,
                "Venue client construction failed; rules on this account are disabled"
            ),
        }
        entries.insert(identity.clone(), entry.clone());
        entry
    }

    /// Number of cached entries, successful or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl std::fmt::Debug for ConnectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionCache")
            .field("registry", &self.registry)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credentials;
    use crate::testkit::venue::{counting_registry, ScriptedAccount};
    use std::sync::atomic::Ordering;

    fn identity(venue: &str, key: &str) -> VenueIdentity {
        VenueIdentity::new(venue, Credentials::new(key, "secret"))
    }

    #[test]
    fn same_identity_returns_same_instance() {
        let (registry, constructions) = counting_registry("scripted", ScriptedAccount::new);
        let cache = ConnectionCache::new(registry, ClientOptions::default());

        let a = cache.client(&identity("scripted", "k1")).expect("client");
        let b = cache.client(&identity("scripted", "k1")).expect("client");

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_identities_get_different_instances() {
        let (registry, constructions) = counting_registry("scripted", ScriptedAccount::new);
        let cache = ConnectionCache::new(registry, ClientOptions::default());

        let a = cache.client(&identity("scripted", "k1")).expect("client");
        let b = cache.client(&identity("scripted", "k2")).expect("client");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(constructions.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn secret_does_not_split_cache_entries() {
        let (registry, constructions) = counting_registry("scripted", ScriptedAccount::new);
        let cache = ConnectionCache::new(registry, ClientOptions::default());

        let a = VenueIdentity::new("scripted", Credentials::new("k1", "one"));
        let b = VenueIdentity::new("scripted", Credentials::new("k1", "two"));
        cache.client(&a).expect("client");
        cache.client(&b).expect("client");

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_venue_failure_is_cached() {
        let cache = ConnectionCache::new(VenueRegistry::new(), ClientOptions::default());
        let id = identity("nowhere", "k1");

        let first = cache.client(&id);
        let second = cache.client(&id);

        assert!(matches!(first, Err(VenueError::Unknown { .. })));
        assert_eq!(first.err(), second.err());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn construction_failure_is_not_retried() {
        let (mut registry, constructions) = counting_registry("scripted", ScriptedAccount::new);
        let failures = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&failures);
        registry.register("broken", move |identity, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(VenueError::Construction {
                venue: identity.venue().to_string(),
                reason: "bad credentials".into(),
            })
        });
        let cache = ConnectionCache::new(registry, ClientOptions::default());

        for _ in 0..3 {
            assert!(cache.client(&identity("broken", "k1")).is_err());
        }

        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert_eq!(constructions.load(Ordering::SeqCst), 0);
    }
}
