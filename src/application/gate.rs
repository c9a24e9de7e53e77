//! Account gate: boolean predicates over live venue account state.
//!
//! [`AccountGate`] answers "does this account hold a positive balance of the
//! quote asset?" and "does it already have a position open on this symbol?".
//! Both answers come from the venue, so both may fail with a [`GateError`].
//!
//! A [`GatePass`] scopes the gate to one file's classification and memoises
//! what was fetched per identity, so two rules on the same account cost one
//! balance fetch and one position fetch. Failures are not memoised.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::cache::ConnectionCache;
use crate::domain::VenueIdentity;
use crate::error::GateError;
use crate::port::{BalanceSheet, OpenPosition};

/// Gate predicates backed by the connection cache.
#[derive(Debug, Clone)]
pub struct AccountGate {
    cache: Arc<ConnectionCache>,
}

impl AccountGate {
    #[must_use]
    pub const fn new(cache: Arc<ConnectionCache>) -> Self {
        Self { cache }
    }

    #[must_use]
    pub fn cache(&self) -> &ConnectionCache {
        &self.cache
    }

    /// Start a memoised pass for one classification.
    #[must_use]
    pub fn pass(&self) -> GatePass<'_> {
        GatePass {
            gate: self,
            balances: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    /// True iff the total balance of `quote_asset` is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] if the client cannot be built or the fetch fails.
    pub async fn positive_balance(
        &self,
        identity: &VenueIdentity,
        quote_asset: &str,
    ) -> Result<bool, GateError> {
        self.pass().positive_balance(identity, quote_asset).await
    }

    /// True iff a position on `symbol` has non-zero size.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] if the client cannot be built or the fetch fails.
    pub async fn has_open_position(
        &self,
        identity: &VenueIdentity,
        symbol: &str,
    ) -> Result<bool, GateError> {
        self.pass().has_open_position(identity, symbol).await
    }

    async fn fetch_balance(&self, identity: &VenueIdentity) -> Result<BalanceSheet, GateError> {
        let client = self.cache.client(identity)?;
        client.fetch_balance().await
    }

    async fn fetch_positions(
        &self,
        identity: &VenueIdentity,
    ) -> Result<Vec<OpenPosition>, GateError> {
        let client = self.cache.client(identity)?;
        client.fetch_positions().await
    }
}

/// Gate view for a single classification, memoising successful fetches.
pub struct GatePass<'a> {
    gate: &'a AccountGate,
    balances: HashMap<VenueIdentity, BalanceSheet>,
    positions: HashMap<VenueIdentity, Vec<OpenPosition>>,
}

impl GatePass<'_> {
    /// See [`AccountGate::positive_balance`].
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] if the client cannot be built or the fetch fails.
    pub async fn positive_balance(
        &mut self,
        identity: &VenueIdentity,
        quote_asset: &str,
    ) -> Result<bool, GateError> {
        if !self.balances.contains_key(identity) {
            let sheet = self.gate.fetch_balance(identity).await?;
            self.balances.insert(identity.clone(), sheet);
        }

        let total = self
            .balances
            .get(identity)
            .and_then(|sheet| sheet.get(quote_asset))
            .map_or(Decimal::ZERO, |balance| balance.total);

        debug!(identity = %identity, asset = quote_asset, %total, "Balance checked");
        Ok(total > Decimal::ZERO)
    }

    /// See [`AccountGate::has_open_position`].
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] if the client cannot be built or the fetch fails.
    pub async fn has_open_position(
        &mut self,
        identity: &VenueIdentity,
        symbol: &str,
    ) -> Result<bool, GateError> {
        if !self.positions.contains_key(identity) {
            let positions = self.gate.fetch_positions(identity).await?;
            self.positions.insert(identity.clone(), positions);
        }

        let open = self
            .positions
            .get(identity)
            .is_some_and(|positions| {
                positions
                    .iter()
                    .any(|p| p.symbol == symbol && p.is_open())
            });

        debug!(identity = %identity, symbol, open, "Position checked");
        Ok(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credentials;
    use crate::infrastructure::exchange::VenueRegistry;
    use crate::port::ClientOptions;
    use crate::testkit::venue::{ScriptedAccount, ScriptedVenue};
    use rust_decimal_macros::dec;

    fn identity(key: &str) -> VenueIdentity {
        VenueIdentity::new("scripted", Credentials::new(key, "secret"))
    }

    fn gate_for(accounts: &[(&str, Arc<ScriptedAccount>)]) -> AccountGate {
        let venue = accounts
            .iter()
            .fold(ScriptedVenue::new("scripted"), |venue, (key, account)| {
                venue.account(key, Arc::clone(account))
            });
        let (registry, _) = venue.into_registry();
        AccountGate::new(Arc::new(ConnectionCache::new(
            registry,
            ClientOptions::default(),
        )))
    }

    #[tokio::test]
    async fn positive_balance_requires_strictly_positive_total() {
        let funded = Arc::new(ScriptedAccount::new().with_balance("USDT", dec!(0.01)));
        let empty = Arc::new(ScriptedAccount::new().with_balance("USDT", dec!(0)));
        let other = Arc::new(ScriptedAccount::new().with_balance("BUSD", dec!(100)));
        let gate = gate_for(&[("funded", funded), ("empty", empty), ("other", other)]);

        assert!(gate.positive_balance(&identity("funded"), "USDT").await.unwrap());
        assert!(!gate.positive_balance(&identity("empty"), "USDT").await.unwrap());
        assert!(!gate.positive_balance(&identity("other"), "USDT").await.unwrap());
    }

    #[tokio::test]
    async fn balance_failure_is_an_error() {
        let account = Arc::new(ScriptedAccount::new().failing_balance());
        let gate = gate_for(&[("k", account)]);

        let result = gate.positive_balance(&identity("k"), "USDT").await;
        assert!(matches!(result, Err(GateError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn open_position_matches_symbol_and_size() {
        let account = Arc::new(
            ScriptedAccount::new()
                .with_position("BTCUSDT", dec!(0))
                .with_position("ETHUSDT", dec!(-1.5)),
        );
        let gate = gate_for(&[("k", account)]);

        assert!(!gate.has_open_position(&identity("k"), "BTCUSDT").await.unwrap());
        assert!(gate.has_open_position(&identity("k"), "ETHUSDT").await.unwrap());
        assert!(!gate.has_open_position(&identity("k"), "SOLUSDT").await.unwrap());
    }

    #[tokio::test]
    async fn construction_failure_surfaces_as_gate_error() {
        let gate = AccountGate::new(Arc::new(ConnectionCache::new(
            VenueRegistry::new(),
            ClientOptions::default(),
        )));

        let result = gate.positive_balance(&identity("k"), "USDT").await;
        assert!(matches!(result, Err(GateError::Venue(_))));
    }

    #[tokio::test]
    async fn pass_memoises_fetches_per_identity() {
        let account = Arc::new(
            ScriptedAccount::new()
                .with_balance("USDT", dec!(10))
                .with_balance("USDC", dec!(5)),
        );
        let gate = gate_for(&[("k", Arc::clone(&account))]);
        let mut pass = gate.pass();

        assert!(pass.positive_balance(&identity("k"), "USDT").await.unwrap());
        assert!(pass.positive_balance(&identity("k"), "USDC").await.unwrap());
        assert!(!pass.has_open_position(&identity("k"), "BTCUSDT").await.unwrap());
        assert!(!pass.has_open_position(&identity("k"), "ETHUSDT").await.unwrap());

        assert_eq!(account.balance_calls(), 1);
        assert_eq!(account.position_calls(), 1);
    }

    #[tokio::test]
    async fn pass_does_not_memoise_failures() {
        let account = Arc::new(ScriptedAccount::new().failing_positions());
        let gate = gate_for(&[("k", Arc::clone(&account))]);
        let mut pass = gate.pass();

        assert!(pass.has_open_position(&identity("k"), "BTCUSDT").await.is_err());
        assert!(pass.has_open_position(&identity("k"), "BTCUSDT").await.is_err());
        assert_eq!(account.position_calls(), 2);
    }

    #[tokio::test]
    async fn separate_passes_fetch_again() {
        let account = Arc::new(ScriptedAccount::new().with_balance("USDT", dec!(1)));
        let gate = gate_for(&[("k", Arc::clone(&account))]);

        gate.positive_balance(&identity("k"), "USDT").await.unwrap();
        gate.positive_balance(&identity("k"), "USDT").await.unwrap();
        assert_eq!(account.balance_calls(), 2);
    }
}
