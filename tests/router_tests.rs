//! Classification across rules, accounts and venue failures.

mod support;

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dropgate::domain::{Credentials, RouteDecision, Rule, VenueIdentity};
use dropgate::error::VenueError;
use dropgate::infrastructure::exchange::VenueRegistry;
use dropgate::testkit::venue::{ScriptedAccount, ScriptedVenue};
use rust_decimal_macros::dec;
use support::routing::{broke, funded, router, rule, VENUE};

fn move_to(path: &str) -> RouteDecision {
    RouteDecision::MoveTo(PathBuf::from(path))
}

#[tokio::test]
async fn first_passing_rule_wins_over_later_rules() {
    let first = funded();
    let second = funded();
    let (registry, _) = ScriptedVenue::new(VENUE)
        .account("first", Arc::clone(&first))
        .account("second", Arc::clone(&second))
        .into_registry();
    let router = router(
        vec![rule("^BTC", "/a", "first"), rule("^BTCUSDT", "/b", "second")],
        registry,
    );

    assert_eq!(router.classify("BTCUSDT_4h.csv").await, move_to("/a"));
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn failed_gate_falls_through_to_next_matching_rule() {
    let empty = broke();
    let full = funded();
    let (registry, _) = ScriptedVenue::new(VENUE)
        .account("empty", Arc::clone(&empty))
        .account("full", Arc::clone(&full))
        .into_registry();
    let router = router(
        vec![rule("^BTC", "/a", "empty"), rule("^BTC", "/b", "full")],
        registry,
    );

    assert_eq!(router.classify("BTCUSDT.csv").await, move_to("/b"));
    assert_eq!(empty.balance_calls(), 1);
    assert_eq!(empty.position_calls(), 0);
    assert_eq!(full.balance_calls(), 1);
    assert_eq!(full.position_calls(), 1);
}

#[tokio::test]
async fn only_matching_rule_queries_its_account() {
    let eth = funded();
    let btc = funded();
    let (registry, _) = ScriptedVenue::new(VENUE)
        .account("eth", Arc::clone(&eth))
        .account("btc", Arc::clone(&btc))
        .into_registry();
    let router = router(vec![rule("^ETH", "/a", "eth"), rule("^BTC", "/b", "btc")], registry);

    assert_eq!(router.classify("BTCUSDT.csv").await, move_to("/b"));
    assert_eq!(eth.calls(), 0);
}

#[tokio::test]
async fn rules_sharing_an_account_fetch_once_per_file() {
    let shared = Arc::new(
        ScriptedAccount::new()
            .with_balance("USDT", dec!(10))
            .with_position("BTCUSDT", dec!(-0.5)),
    );
    let (registry, _) = ScriptedVenue::new(VENUE)
        .account("shared", Arc::clone(&shared))
        .into_registry();
    let router = router(
        vec![rule("^BTC", "/a", "shared"), rule("^BTCUSDT", "/b", "shared")],
        registry,
    );

    assert_eq!(router.classify("BTCUSDT.csv").await, RouteDecision::Fallback);
    assert_eq!(shared.balance_calls(), 1);
    assert_eq!(shared.position_calls(), 1);
}

#[tokio::test]
async fn account_state_is_queried_fresh_for_every_file() {
    let account = funded();
    let (registry, constructions) = ScriptedVenue::new(VENUE)
        .account("a", Arc::clone(&account))
        .into_registry();
    let router = router(vec![rule("^BTC", "/a", "a")], registry);

    for _ in 0..3 {
        assert_eq!(router.classify("BTCUSDT.csv").await, move_to("/a"));
    }
    assert_eq!(account.balance_calls(), 3);
    assert_eq!(account.position_calls(), 3);
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn construction_failure_skips_rule_and_later_rules_still_route() {
    let good = funded();
    let mut registry = VenueRegistry::new();
    registry.register("broken", |_, _| {
        Err(VenueError::Construction {
            venue: "broken".into(),
            reason: "missing credentials".into(),
        })
    });
    let constructions = ScriptedVenue::new(VENUE)
        .account("good", Arc::clone(&good))
        .register_into(&mut registry);

    let broken_identity = VenueIdentity::new("broken", Credentials::new("x", "y"));
    let broken_rule = Rule::new("^BTC", "/broken", broken_identity, "broken").expect("pattern");
    let router = router(vec![broken_rule, rule("^BTC", "/good", "good")], registry);

    for _ in 0..2 {
        assert_eq!(router.classify("BTCUSDT.csv").await, move_to("/good"));
    }
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn balance_failure_skips_rule() {
    let failing = Arc::new(ScriptedAccount::new().failing_balance());
    let fallback = funded();
    let (registry, _) = ScriptedVenue::new(VENUE)
        .account("failing", Arc::clone(&failing))
        .account("fallback", Arc::clone(&fallback))
        .into_registry();
    let router = router(
        vec![rule("^BTC", "/a", "failing"), rule("^BTC", "/b", "fallback")],
        registry,
    );

    assert_eq!(router.classify("BTCUSDT.csv").await, move_to("/b"));
    assert_eq!(failing.position_calls(), 0);
}

#[tokio::test]
async fn quote_asset_override_changes_balance_and_symbol() {
    let account = Arc::new(ScriptedAccount::new().with_balance("USDC", dec!(5)));
    let (registry, _) = ScriptedVenue::new(VENUE)
        .account("a", Arc::clone(&account))
        .into_registry();
    let router = router(vec![rule("^ETH", "/a", "a").with_quote_asset("USDC")], registry);

    assert_eq!(router.classify("ETHUSDC-signal.json").await, move_to("/a"));
    assert_eq!(router.classify("ETHUSDT-signal.json").await, RouteDecision::Fallback);
}
