//! View probe backed by a file
//!
//! The host (or a test script) writes the name of the current view into a
//! file; the monitor reads it on every poll.

use mutcost_core::ViewProbe;
use std::path::PathBuf;

/// Reads the current view name from a file
#[derive(Debug, Clone)]
pub(crate) struct FileViewProbe {
    path: PathBuf,
}

impl FileViewProbe {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ViewProbe for FileViewProbe {
    /// Empty when the file is missing or unreadable
    fn current_view(&self) -> String {
        std::fs::read_to_string(&self.path)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}
