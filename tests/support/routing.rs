use std::sync::Arc;

use dropgate::application::{AccountGate, ConnectionCache, Router};
use dropgate::domain::{Credentials, Rule, RuleSet, VenueIdentity};
use dropgate::infrastructure::exchange::VenueRegistry;
use dropgate::port::ClientOptions;
use dropgate::testkit::venue::ScriptedAccount;
use rust_decimal_macros::dec;

pub const VENUE: &str = "scripted";

pub fn identity(api_key: &str) -> VenueIdentity {
    VenueIdentity::new(VENUE, Credentials::new(api_key, "secret"))
}

pub fn rule(pattern: &str, destination: &str, api_key: &str) -> Rule {
    Rule::new(pattern, destination, identity(api_key), api_key).expect("valid pattern")
}

pub fn router(rules: Vec<Rule>, registry: VenueRegistry) -> Router {
    let cache = Arc::new(ConnectionCache::new(registry, ClientOptions::default()));
    Router::new(Arc::new(RuleSet::new(rules)), AccountGate::new(cache))
}

pub fn funded() -> Arc<ScriptedAccount> {
    Arc::new(ScriptedAccount::new().with_balance("USDT", dec!(250)))
}

pub fn broke() -> Arc<ScriptedAccount> {
    Arc::new(ScriptedAccount::new().with_balance("USDT", dec!(0)))
}
