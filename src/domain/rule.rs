//! Routing rules and the ordered rule set.
//!
//! A [`Rule`] pairs a file-name pattern with a destination directory and the
//! venue account whose state gates the route. A [`RuleSet`] is built once at
//! startup and never changes; its order is the routing priority.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::id::VenueIdentity;
use super::symbol::DEFAULT_QUOTE_ASSET;

/// One routing branch.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Compiled pattern anchored at the start of the file name.
    /// `None` means the rule never matches.
    pattern: Option<Regex>,
    destination: PathBuf,
    identity: VenueIdentity,
    account_label: String,
    quote_asset: String,
}

impl Rule {
    /// Build a rule from a raw pattern.
    ///
    /// An empty or whitespace-only pattern disables the rule.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error if the pattern is not a valid regex.
    pub fn new(
        pattern: &str,
        destination: impl Into<PathBuf>,
        identity: VenueIdentity,
        account_label: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        let pattern = if pattern.trim().is_empty() {
            None
        } else {
            Some(Regex::new(&format!("^(?:{pattern})"))?)
        };

        Ok(Self {
            pattern,
            destination: destination.into(),
            identity,
            account_label: account_label.into(),
            quote_asset: DEFAULT_QUOTE_ASSET.to_string(),
        })
    }

    /// Override the quote asset used for the balance and symbol checks.
    #[must_use]
    pub fn with_quote_asset(mut self, quote_asset: impl Into<String>) -> Self {
        self.quote_asset = quote_asset.into();
        self
    }

    /// Whether the pattern matches from the start of `file_name`.
    ///
    /// A prefix match is enough; a disabled rule never matches.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(file_name))
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.pattern.is_none()
    }

    /// The anchored pattern as compiled, if the rule is enabled.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    #[must_use]
    pub const fn identity(&self) -> &VenueIdentity {
        &self.identity
    }

    #[must_use]
    pub fn account_label(&self) -> &str {
        &self.account_label
    }

    #[must_use]
    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }
}

/// Fixed, ordered sequence of rules. Earlier rules win.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterate rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::Credentials;

    fn identity() -> VenueIdentity {
        VenueIdentity::new("binance", Credentials::new("key", "secret"))
    }

    fn rule(pattern: &str) -> Rule {
        Rule::new(pattern, "/nested/a", identity(), "main").expect("valid pattern")
    }

    #[test]
    fn matches_prefix_not_full_name() {
        let rule = rule("BTCUSDT");
        assert!(rule.matches("BTCUSDTfoo.csv"));
        assert!(rule.matches("BTCUSDT"));
    }

    #[test]
    fn pattern_is_anchored_at_start() {
        let rule = rule("BTC");
        assert!(!rule.matches("xBTCUSDT.csv"));
        assert!(!rule.matches("ETHBTC.csv"));
    }

    #[test]
    fn explicit_anchor_is_accepted() {
        assert!(rule("^BTCUSDT").matches("BTCUSDTfoo.csv"));
    }

    #[test]
    fn alternation_stays_anchored() {
        let rule = rule("ETH|BTC");
        assert!(rule.matches("BTCUSDT.csv"));
        assert!(rule.matches("ETHUSDT.csv"));
        assert!(!rule.matches("SOLBTC.csv"));
    }

    #[test]
    fn empty_pattern_never_matches() {
        for pattern in ["", "   "] {
            let rule = rule(pattern);
            assert!(rule.is_disabled());
            assert!(!rule.matches(""));
            assert!(!rule.matches("BTCUSDT.csv"));
        }
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(Rule::new("(", "/a", identity(), "main").is_err());
    }

    #[test]
    fn quote_asset_defaults_to_usdt() {
        assert_eq!(rule("BTC").quote_asset(), "USDT");
        assert_eq!(rule("BTC").with_quote_asset("USDC").quote_asset(), "USDC");
    }

    #[test]
    fn rule_set_preserves_order() {
        let set: RuleSet = vec![rule("A"), rule("B"), rule("C")].into_iter().collect();
        let matched: Vec<bool> = set.iter().map(|r| r.matches("B.csv")).collect();
        assert_eq!(matched, vec![false, true, false]);
        assert_eq!(set.len(), 3);
        assert!(RuleSet::empty().is_empty());
    }
}
