//! Venue account port.
//!
//! An [`AccountClient`] answers the two questions the router asks about an
//! account: what balances it holds and which positions are open. Clients are
//! read-only; nothing here places orders.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::GateError;

/// Balance of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetBalance {
    /// Wallet total, including amounts locked as margin.
    pub total: Decimal,
    /// Amount available for new positions.
    pub free: Decimal,
}

/// Balances keyed by asset code (e.g. `USDT`).
pub type BalanceSheet = HashMap<String, AssetBalance>;

/// A position as reported by the venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPosition {
    /// Venue-native symbol, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Signed size in contracts; negative for shorts.
    pub contracts: Decimal,
}

impl OpenPosition {
    pub fn new(symbol: impl Into<String>, contracts: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            contracts,
        }
    }

    /// A position counts as open when its size is non-zero in either direction.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.contracts.is_zero()
    }
}

/// Transport options shared by every client a process constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Validity window for signed requests.
    pub recv_window: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            recv_window: Duration::from_secs(5),
        }
    }
}

/// Read-only client for one account on one venue.
///
/// Implementations talk to the venue's derivatives (futures) account.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Fetch balances for every asset the account holds.
    async fn fetch_balance(&self) -> Result<BalanceSheet, GateError>;

    /// Fetch the account's positions.
    async fn fetch_positions(&self) -> Result<Vec<OpenPosition>, GateError>;

    /// Venue name for logging/debugging.
    fn venue_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn short_positions_are_open() {
        assert!(OpenPosition::new("BTCUSDT", dec!(-0.5)).is_open());
        assert!(OpenPosition::new("BTCUSDT", dec!(2)).is_open());
        assert!(!OpenPosition::new("BTCUSDT", dec!(0)).is_open());
    }
}
