//! Routing runtime lifecycle.
//!
//! One task consumes watcher events and processes each to completion
//! (settle delay, classify, move) before taking the next. Shutdown is only
//! observed between events, so a file is never left half-handled.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::application::{FileMover, Router};
use crate::domain::RouteDecision;
use crate::error::{MoveError, Result};
use crate::infrastructure::bootstrap::{build_mover, build_router, build_watcher};
use crate::infrastructure::config::Config;
use crate::infrastructure::exchange::VenueRegistry;
use crate::port::{FileEvent, FileWatcher};

/// What happened to one inbound file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Moved into a rule's destination.
    Nested(PathBuf),
    /// Moved into the fallback directory.
    Fallback(PathBuf),
    /// Gone before it could be moved.
    Vanished,
    /// Move failed; the file is still in the inbound directory.
    Failed,
}

/// Counters reported when the runtime stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingSummary {
    pub nested: u64,
    pub fallback: u64,
    pub vanished: u64,
    pub failed: u64,
    /// Events dropped before classification (directories, foreign paths).
    pub ignored: u64,
}

impl RoutingSummary {
    fn record(&mut self, outcome: &RouteOutcome) {
        match outcome {
            RouteOutcome::Nested(_) => self.nested += 1,
            RouteOutcome::Fallback(_) => self.fallback += 1,
            RouteOutcome::Vanished => self.vanished += 1,
            RouteOutcome::Failed => self.failed += 1,
        }
    }

    /// Files that reached a destination.
    #[must_use]
    pub const fn moved(&self) -> u64 {
        self.nested + self.fallback
    }
}

/// Router + mover driven by a stream of file events.
#[derive(Debug, Clone)]
pub struct RoutingRuntime {
    router: Router,
    mover: FileMover,
    settle_delay: Duration,
}

impl RoutingRuntime {
    #[must_use]
    pub const fn new(router: Router, mover: FileMover, settle_delay: Duration) -> Self {
        Self {
            router,
            mover,
            settle_delay,
        }
    }

    /// Consume `watcher` until it ends or `shutdown` flips to `true`.
    pub async fn run<W>(&self, watcher: &mut W, mut shutdown: watch::Receiver<bool>) -> RoutingSummary
    where
        W: FileWatcher + ?Sized,
    {
        let inbound = watcher.directory().to_path_buf();
        let mut summary = RoutingSummary::default();
        info!(directory = %inbound.display(), rules = self.router.rules().len(), "Watching inbound directory");

        loop {
            if *shutdown.borrow() {
                info!("Shutdown signal received");
                break;
            }

            let event = tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() {
                        info!("Shutdown channel closed");
                        break;
                    }
                    continue;
                }
                event = watcher.next_event() => event,
            };

            let Some(event) = event else {
                warn!("Watch stream ended");
                break;
            };

            match self.handle_event(&event, &inbound).await {
                Some(outcome) => summary.record(&outcome),
                None => summary.ignored += 1,
            }
        }

        info!(
            nested = summary.nested,
            fallback = summary.fallback,
            vanished = summary.vanished,
            failed = summary.failed,
            "Routing stopped"
        );
        summary
    }

    /// Filter, settle and route one event. `None` if the event is ignored.
    pub async fn handle_event(&self, event: &FileEvent, inbound: &Path) -> Option<RouteOutcome> {
        if event.is_directory {
            debug!(path = %event.path.display(), "Ignoring directory");
            return None;
        }
        if !event.is_child_of(inbound) {
            debug!(path = %event.path.display(), "Ignoring path outside inbound directory");
            return None;
        }

        info!(path = %event.path.display(), "New file");
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        Some(self.route_file(&event.path).await)
    }

    /// Classify and move one file. Never fails: errors become outcomes.
    pub async fn route_file(&self, path: &Path) -> RouteOutcome {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let decision = self.router.classify(&file_name).await;

        match self.mover.execute(path, &decision).await {
            Ok(target) => {
                info!(file = %file_name, to = %target.display(), "File moved");
                match decision {
                    RouteDecision::MoveTo(_) => RouteOutcome::Nested(target),
                    RouteDecision::Fallback => RouteOutcome::Fallback(target),
                }
            }
            Err(MoveError::SourceVanished { path }) => {
                warn!(path = %path.display(), "File vanished before it could be moved");
                RouteOutcome::Vanished
            }
            Err(e) => {
                error!(file = %file_name, error = %e, "Move failed, file left in place");
                RouteOutcome::Failed
            }
        }
    }
}

/// Build everything from `config` and run until `shutdown` or end of stream.
///
/// # Errors
///
/// Returns configuration errors and watcher start-up failures. Nothing that
/// happens to an individual file is returned as an error.
pub async fn run_with_shutdown(
    config: Config,
    registry: VenueRegistry,
    shutdown: watch::Receiver<bool>,
) -> Result<RoutingSummary> {
    let router = build_router(&config, registry)?;
    let mover = build_mover(&config);

    for missing in config.missing_destinations() {
        warn!(path = %missing.display(), "Destination directory does not exist");
    }

    let mut watcher = build_watcher(&config).await?;
    let runtime = RoutingRuntime::new(router, mover, config.settle_delay());
    Ok(runtime.run(&mut watcher, shutdown).await)
}
