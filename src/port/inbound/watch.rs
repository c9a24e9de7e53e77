//! Directory watch port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// A "file created" notification for a direct child of the watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub is_directory: bool,
}

impl FileEvent {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
        }
    }

    /// Whether this event refers to a direct child of `dir`.
    #[must_use]
    pub fn is_child_of(&self, dir: &Path) -> bool {
        self.path.parent() == Some(dir)
    }
}

/// Source of creation events for one directory.
///
/// Non-recursive. Returning `None` ends the stream.
#[async_trait]
pub trait FileWatcher: Send {
    /// Wait for the next creation event.
    async fn next_event(&mut self) -> Option<FileEvent>;

    /// Directory being watched.
    fn directory(&self) -> &Path;
}
