//! Scripted [`AccountClient`] implementations for testing.
//!
//! - [`ScriptedAccount`] - fixed balances/positions (or failures) with call
//!   counters. Best for: gate short-circuit and call-count assertions.
//! - [`ScriptedVenue`] - builds a [`VenueRegistry`] that hands out pre-made
//!   accounts by api key and counts constructions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{GateError, VenueError};
use crate::infrastructure::exchange::VenueRegistry;
use crate::port::{AccountClient, AssetBalance, BalanceSheet, OpenPosition};

// ---------------------------------------------------------------------------
// ScriptedAccount
// ---------------------------------------------------------------------------

/// An account with fixed state and shared call counters.
#[derive(Debug, Default)]
pub struct ScriptedAccount {
    balances: BalanceSheet,
    positions: Vec<OpenPosition>,
    balance_fails: bool,
    positions_fail: bool,
    balance_calls: AtomicUsize,
    position_calls: AtomicUsize,
}

impl ScriptedAccount {
    /// Empty account: no balances, no positions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_balance(mut self, asset: &str, total: Decimal) -> Self {
        self.balances
            .insert(asset.to_string(), AssetBalance { total, free: total });
        self
    }

    #[must_use]
    pub fn with_position(mut self, symbol: &str, contracts: Decimal) -> Self {
        self.positions.push(OpenPosition::new(symbol, contracts));
        self
    }

    /// Every balance fetch fails.
    #[must_use]
    pub fn failing_balance(mut self) -> Self {
        self.balance_fails = true;
        self
    }

    /// Every position fetch fails.
    #[must_use]
    pub fn failing_positions(mut self) -> Self {
        self.positions_fail = true;
        self
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn position_calls(&self) -> usize {
        self.position_calls.load(Ordering::SeqCst)
    }

    /// Total external calls made against this account.
    pub fn calls(&self) -> usize {
        self.balance_calls() + self.position_calls()
    }

    fn scripted_failure() -> GateError {
        GateError::Api {
            status: 503,
            body: "scripted failure".into(),
        }
    }
}

#[async_trait]
impl AccountClient for ScriptedAccount {
    async fn fetch_balance(&self) -> Result<BalanceSheet, GateError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.balance_fails {
            return Err(Self::scripted_failure());
        }
        Ok(self.balances.clone())
    }

    async fn fetch_positions(&self) -> Result<Vec<OpenPosition>, GateError> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        if self.positions_fail {
            return Err(Self::scripted_failure());
        }
        Ok(self.positions.clone())
    }

    fn venue_name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// ScriptedVenue
// ---------------------------------------------------------------------------

/// Registry builder that serves pre-made accounts by api key.
///
/// Unknown api keys fail construction, which makes "construction failed"
/// scenarios easy to script.
#[derive(Default)]
pub struct ScriptedVenue {
    name: String,
    accounts: HashMap<String, Arc<ScriptedAccount>>,
}

impl ScriptedVenue {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            accounts: HashMap::new(),
        }
    }

    /// Serve `account` to identities whose api key is `api_key`.
    #[must_use]
    pub fn account(mut self, api_key: &str, account: Arc<ScriptedAccount>) -> Self {
        self.accounts.insert(api_key.to_string(), account);
        self
    }

    /// Register into a fresh registry, returning the construction counter.
    pub fn into_registry(self) -> (VenueRegistry, Arc<AtomicUsize>) {
        let mut registry = VenueRegistry::new();
        let constructions = self.register_into(&mut registry);
        (registry, constructions)
    }

    /// Register into an existing registry, returning the construction counter.
    pub fn register_into(self, registry: &mut VenueRegistry) -> Arc<AtomicUsize> {
        let constructions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&constructions);
        let accounts = self.accounts;
        let name = self.name.clone();

        registry.register(&self.name, move |identity, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            accounts
                .get(identity.credentials().api_key())
                .map(|account| Arc::clone(account) as Arc<dyn AccountClient>)
                .ok_or_else(|| VenueError::Construction {
                    venue: name.clone(),
                    reason: format!(
                        "no scripted account for key {}",
                        identity.credentials().api_key()
                    ),
                })
        });
        constructions
    }
}

/// Registry whose single venue builds a fresh account per construction.
pub fn counting_registry<F>(name: &str, factory: F) -> (VenueRegistry, Arc<AtomicUsize>)
where
    F: Fn() -> ScriptedAccount + Send + Sync + 'static,
{
    let mut registry = VenueRegistry::new();
    let constructions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructions);
    registry.register(name, move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(factory()) as Arc<dyn AccountClient>)
    });
    (registry, constructions)
}
