//! Rule evaluation for inbound files.
//!
//! Rules are tried in declared order and the first one that passes every
//! check wins. Per rule:
//!
//! 1. pattern match against the file name (no I/O);
//! 2. positive quote-asset balance;
//! 3. symbol extraction from the file name;
//! 4. no open position on that symbol.
//!
//! A failed venue query never aborts classification: the rule is skipped and
//! evaluation moves on. A position query that fails counts as "open".

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::gate::{AccountGate, GatePass};
use crate::domain::{extract_symbol, RouteDecision, Rule, RuleSet};

/// Why a matching rule did not win. Used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    NoBalance,
    BalanceUnavailable,
    NoSymbol,
    PositionOpen,
    PositionUnavailable,
}

/// Classifies file names against an ordered rule set.
#[derive(Debug, Clone)]
pub struct Router {
    rules: Arc<RuleSet>,
    gate: AccountGate,
}

impl Router {
    #[must_use]
    pub fn new(rules: Arc<RuleSet>, gate: AccountGate) -> Self {
        Self { rules, gate }
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Decide where `file_name` goes. Always returns exactly one decision.
    pub async fn classify(&self, file_name: &str) -> RouteDecision {
        let mut pass = self.gate.pass();

        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.matches(file_name) {
                continue;
            }

            match Self::evaluate(rule, file_name, &mut pass).await {
                Ok(()) => {
                    info!(
                        file = file_name,
                        rule = index,
                        account = rule.account_label(),
                        destination = %rule.destination().display(),
                        "Rule passed"
                    );
                    return RouteDecision::MoveTo(rule.destination().to_path_buf());
                }
                Err(skip) => {
                    debug!(
                        file = file_name,
                        rule = index,
                        account = rule.account_label(),
                        reason = ?skip,
                        "Rule skipped"
                    );
                }
            }
        }

        debug!(file = file_name, "No rule passed, using fallback");
        RouteDecision::Fallback
    }

    async fn evaluate(
        rule: &Rule,
        file_name: &str,
        pass: &mut GatePass<'_>,
    ) -> Result<(), Skip> {
        let identity = rule.identity();

        match pass.positive_balance(identity, rule.quote_asset()).await {
            Ok(true) => {}
            Ok(false) => return Err(Skip::NoBalance),
            Err(e) => {
                warn!(
                    file = file_name,
                    account = rule.account_label(),
                    venue = %identity.venue(),
                    error = %e,
                    "Balance check failed"
                );
                return Err(Skip::BalanceUnavailable);
            }
        }

        let symbol = extract_symbol(file_name, rule.quote_asset()).ok_or(Skip::NoSymbol)?;

        match pass.has_open_position(identity, symbol).await {
            Ok(false) => Ok(()),
            Ok(true) => Err(Skip::PositionOpen),
            Err(e) => {
                warn!(
                    file = file_name,
                    account = rule.account_label(),
                    venue = %identity.venue(),
                    symbol,
                    error = %e,
                    "Position check failed, treating as open"
                );
                Err(Skip::PositionUnavailable)
            }
        }
    }
}
