//! Runtime orchestration: the run-until-cancelled event loop.

pub mod runtime;

pub use runtime::{run_with_shutdown, RouteOutcome, RoutingRuntime, RoutingSummary};
