//! Routing decisions.

use std::path::{Path, PathBuf};

/// Where a single inbound file goes. Exactly one per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// A rule won; move into its destination directory.
    MoveTo(PathBuf),
    /// No rule matched or passed its gates.
    Fallback,
}

impl RouteDecision {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }

    /// Resolve the directory this decision targets.
    #[must_use]
    pub fn directory<'a>(&'a self, fallback: &'a Path) -> &'a Path {
        match self {
            Self::MoveTo(dir) => dir,
            Self::Fallback => fallback,
        }
    }
}
