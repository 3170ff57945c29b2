// src/cleanup.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Temporary files of a run, removed when the guard goes out of scope.
///
/// Removal failures are logged and otherwise ignored: by the time the guard
/// drops, the shards are either written or the run has already failed.
#[derive(Debug, Default)]
pub struct ScratchFiles {
    paths: Vec<PathBuf>,
}

impl ScratchFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `path`; it will be removed on drop.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    pub fn extend<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.paths.extend(paths);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

fn remove(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            match remove(&path) {
                Ok(true) => info!(path = %path.display(), "removed temporary file"),
                Ok(false) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove temporary file"),
            }
        }
    }
}
