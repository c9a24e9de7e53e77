//! Executes routing decisions on the filesystem.
//!
//! A move is a single `rename`. When source and target live on different
//! filesystems the rename fails with `EXDEV` and the file is copied instead:
//! into a hidden staging name next to the target, renamed into place, and
//! only then removed from the source. Readers of the destination never see a
//! partial file. Target directories are never created here. An existing
//! file with the same name is overwritten.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::RouteDecision;
use crate::error::MoveError;

/// Moves inbound files to the directory chosen by the router.
#[derive(Debug, Clone)]
pub struct FileMover {
    fallback: PathBuf,
}

impl FileMover {
    pub fn new(fallback: impl Into<PathBuf>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    #[must_use]
    pub fn fallback(&self) -> &Path {
        &self.fallback
    }

    /// Target path for `source` under `decision`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Io`] if `source` has no file name component.
    pub fn target(&self, source: &Path, decision: &RouteDecision) -> Result<PathBuf, MoveError> {
        let directory = decision.directory(&self.fallback);
        let name = source.file_name().ok_or_else(|| MoveError::Io {
            from: source.to_path_buf(),
            to: directory.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        })?;
        Ok(directory.join(name))
    }

    /// Move `source` according to `decision`, returning the new path.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SourceVanished`] if `source` no longer exists and
    /// [`MoveError::Io`] for any other failure. On error the file is left
    /// where it was.
    pub async fn execute(
        &self,
        source: &Path,
        decision: &RouteDecision,
    ) -> Result<PathBuf, MoveError> {
        let target = self.target(source, decision)?;

        match tokio::fs::rename(source, &target).await {
            Ok(()) => {
                debug!(from = %source.display(), to = %target.display(), "Renamed");
                Ok(target)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !source.exists() => {
                Err(MoveError::SourceVanished {
                    path: source.to_path_buf(),
                })
            }
            Err(e) if is_cross_device(&e) => {
                warn!(
                    from = %source.display(),
                    to = %target.display(),
                    "Cross-device move, copying instead"
                );
                copy_then_remove(source, &target).await?;
                Ok(target)
            }
            Err(e) => Err(MoveError::Io {
                from: source.to_path_buf(),
                to: target,
                source: e,
            }),
        }
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

async fn copy_then_remove(source: &Path, target: &Path) -> Result<(), MoveError> {
    let io_err = |e: io::Error| {
        if e.kind() == io::ErrorKind::NotFound && !source.exists() {
            MoveError::SourceVanished {
                path: source.to_path_buf(),
            }
        } else {
            MoveError::Io {
                from: source.to_path_buf(),
                to: target.to_path_buf(),
                source: e,
            }
        }
    };

    let staging = staging_path(target);
    let staged = match tokio::fs::copy(source, &staging).await {
        Ok(_) => tokio::fs::rename(&staging, target).await,
        Err(e) => Err(e),
    };
    if let Err(e) = staged {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(io_err(e));
    }

    if let Err(e) = tokio::fs::remove_file(source).await {
        // Leave exactly one copy behind.
        let _ = tokio::fs::remove_file(target).await;
        return Err(io_err(e));
    }
    Ok(())
}

/// Hidden sibling of `target` used while a cross-device copy is in progress.
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.partial"))
}
