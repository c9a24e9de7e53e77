//! Venue-agnostic domain types: identities, rules, decisions.

pub mod decision;
pub mod id;
pub mod rule;
pub mod symbol;

pub use decision::RouteDecision;
pub use id::{Credentials, VenueId, VenueIdentity};
pub use rule::{Rule, RuleSet};
pub use symbol::{extract_symbol, DEFAULT_QUOTE_ASSET};
