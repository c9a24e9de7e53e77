//! Polling directory watcher.
//!
//! Scans the inbound directory every `interval` and reports names that were
//! not present on the previous scan. A file stops being known once its event
//! has been handed out, so the next scan reports whatever sits under that
//! name: a new file dropped with a reused name, or a file whose move failed.
//! Only direct children are reported; sub-directories are reported as
//! directory events once and never descended into.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::port::{FileEvent, FileWatcher};

/// [`FileWatcher`] backed by periodic `read_dir` scans.
pub struct PollingWatcher {
    directory: PathBuf,
    known: HashSet<PathBuf>,
    pending: VecDeque<FileEvent>,
    ticker: Interval,
}

impl PollingWatcher {
    /// Start watching `directory`.
    ///
    /// The first scan runs immediately. With `sweep_existing` its entries are
    /// reported as creation events; otherwise they are only remembered.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the first scan (e.g. the directory is missing).
    pub async fn start(
        directory: impl Into<PathBuf>,
        every: Duration,
        sweep_existing: bool,
    ) -> std::io::Result<Self> {
        let directory = directory.into();
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the next scan
        // happens one interval after the initial one.
        ticker.tick().await;

        let mut watcher = Self {
            directory,
            known: HashSet::new(),
            pending: VecDeque::new(),
            ticker,
        };

        let initial = watcher.scan().await?;
        if sweep_existing {
            watcher.pending.extend(initial);
        }
        debug!(
            directory = %watcher.directory.display(),
            existing = watcher.known.len(),
            sweep_existing,
            "Watcher started"
        );
        Ok(watcher)
    }

    /// Read the directory and return events for entries not seen before.
    async fn scan(&mut self) -> std::io::Result<Vec<FileEvent>> {
        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        let mut present = BTreeSet::new();
        let mut directories = HashSet::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                directories.insert(path.clone());
            }
            present.insert(path);
        }

        let events = present
            .iter()
            .filter(|path| !self.known.contains(*path))
            .map(|path| FileEvent {
                path: path.clone(),
                is_directory: directories.contains(path),
            })
            .collect();

        self.known = present.into_iter().collect();
        Ok(events)
    }
}

#[async_trait]
impl FileWatcher for PollingWatcher {
    async fn next_event(&mut self) -> Option<FileEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                if !event.is_directory {
                    self.known.remove(&event.path);
                }
                return Some(event);
            }

            self.ticker.tick().await;
            match self.scan().await {
                Ok(events) => self.pending.extend(events),
                Err(e) => {
                    // Keep polling; the directory may come back.
                    warn!(directory = %self.directory.display(), error = %e, "Directory scan failed");
                }
            }
        }
    }

    fn directory(&self) -> &Path {
        &self.directory
    }
}
