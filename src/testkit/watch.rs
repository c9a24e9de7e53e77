//! Mock [`FileWatcher`] implementations for testing.
//!
//! - [`ScriptedWatcher`] - fixed event queue, ends when exhausted.
//!   Best for: bounded runs that must terminate on their own.
//! - [`ChannelWatcher`] - channel-backed with an external sender.
//!   Best for: shutdown tests and on-demand event delivery.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::port::{FileEvent, FileWatcher};

// ---------------------------------------------------------------------------
// ScriptedWatcher
// ---------------------------------------------------------------------------

/// Replays a fixed list of events, then ends the stream.
pub struct ScriptedWatcher {
    directory: PathBuf,
    events: VecDeque<FileEvent>,
}

impl ScriptedWatcher {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            events: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: Vec<FileEvent>) -> Self {
        self.events = events.into();
        self
    }

    /// Queue a file event for `name` inside the watched directory.
    #[must_use]
    pub fn with_file(mut self, name: &str) -> Self {
        let path = self.directory.join(name);
        self.events.push_back(FileEvent::file(path));
        self
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl FileWatcher for ScriptedWatcher {
    async fn next_event(&mut self) -> Option<FileEvent> {
        self.events.pop_front()
    }

    fn directory(&self) -> &Path {
        &self.directory
    }
}

// ---------------------------------------------------------------------------
// ChannelWatcher
// ---------------------------------------------------------------------------

/// Delivers whatever is sent on its channel; ends when all senders drop.
pub struct ChannelWatcher {
    directory: PathBuf,
    rx: mpsc::UnboundedReceiver<FileEvent>,
}

impl ChannelWatcher {
    pub fn new(directory: impl Into<PathBuf>) -> (Self, mpsc::UnboundedSender<FileEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                directory: directory.into(),
                rx,
            },
            tx,
        )
    }
}

#[async_trait]
impl FileWatcher for ChannelWatcher {
    async fn next_event(&mut self) -> Option<FileEvent> {
        self.rx.recv().await
    }

    fn directory(&self) -> &Path {
        &self.directory
    }
}
