//! Per-run scratch directory.

use std::path::Path;

use tempfile::TempDir;
use tracing::debug;
use tracing::warn;

use crate::Result;

/// Exclusively owned extraction directory, removed when dropped.
///
/// Created immediately before extraction. Every exit path of a run, including
/// errors and timeouts, drops the value and deletes the tree. Call
/// [`close`](Self::close) on the success path to observe removal errors.
#[derive(Debug)]
pub struct ScratchDir {
    inner: TempDir,
}

impl ScratchDir {
    /// Creates a fresh directory under the system temp dir.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn new(prefix: &str) -> Result<Self> {
        let inner = tempfile::Builder::new().prefix(prefix).tempdir()?;
        debug!(path = %inner.path().display(), "created scratch directory");
        Ok(Self { inner })
    }

    /// Path of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Removes the directory now, reporting failure as a warning.
    pub fn close(self) {
        let path = self.inner.path().to_path_buf();
        match self.inner.close() {
            Ok(()) => debug!(path = %path.display(), "removed scratch directory"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove scratch directory"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_removed_on_close() {
        let scratch = ScratchDir::new("vaultprobe-test-").unwrap();
        let path = scratch.path().to_path_buf();
        fs::create_dir_all(path.join("credentials/a")).unwrap();
        fs::write(path.join("credentials/a/record.yml"), "x").unwrap();
        assert!(path.exists());

        scratch.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_removed_on_drop() {
        let path = {
            let scratch = ScratchDir::new("vaultprobe-test-").unwrap();
            fs::write(scratch.path().join("metadata.yml"), "credential_count: 1").unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_prefix_applied() {
        let scratch = ScratchDir::new("vaultprobe-prefix-").unwrap();
        let name = scratch.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("vaultprobe-prefix-"));
    }

    #[test]
    fn test_distinct_per_run() {
        let a = ScratchDir::new("vaultprobe-test-").unwrap();
        let b = ScratchDir::new("vaultprobe-test-").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
