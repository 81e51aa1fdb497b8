//! Temporary directory fixtures.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::Result;

/// Prefix used when a test does not pick one.
pub const DEFAULT_TEMP_PREFIX: &str = "test-";

/// Create a uniquely named directory under the system temp root.
///
/// The directory is not removed automatically; pair with
/// [`cleanup_temp_dir`] or use [`ScopedTempDir`] instead.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the temp root is not writable.
pub async fn create_temp_dir(prefix: &str) -> Result<PathBuf> {
    let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
    let path = dir.keep();
    debug!(path = %path.display(), "created temp dir");
    Ok(path)
}

/// Remove a directory and everything below it.
///
/// A path that is already gone is not an error, so cleanup can run
/// unconditionally in teardown.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) for any failure other than the
/// path being absent.
pub async fn cleanup_temp_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed temp dir");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "temp dir already absent");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// A temp directory that is removed when dropped.
///
/// This is the fixture injected by `#[testkit_support::test]` for parameters
/// of this type.
#[derive(Debug)]
pub struct ScopedTempDir {
    inner: tempfile::TempDir,
}

impl ScopedTempDir {
    /// Create a new scoped temp dir with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the temp root is not writable.
    pub fn new(prefix: &str) -> Result<Self> {
        let inner = tempfile::Builder::new().prefix(prefix).tempdir()?;
        debug!(path = %inner.path().display(), "created scoped temp dir");
        Ok(Self { inner })
    }

    /// Path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Join a relative path onto the directory.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.inner.path().join(relative)
    }

    /// Stop managing the directory and return its path.
    ///
    /// The caller becomes responsible for removing it.
    #[must_use]
    pub fn keep(self) -> PathBuf {
        self.inner.keep()
    }
}

impl AsRef<Path> for ScopedTempDir {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_temp_dir_uses_prefix() {
        let path = create_temp_dir("prefix-check-").await.unwrap();

        assert!(path.is_dir());
        assert!(path.starts_with(std::env::temp_dir()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("prefix-check-"));

        cleanup_temp_dir(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_removes_contents() {
        let path = create_temp_dir(DEFAULT_TEMP_PREFIX).await.unwrap();
        std::fs::create_dir_all(path.join("a/b")).unwrap();
        std::fs::write(path.join("a/b/c.txt"), "x").unwrap();

        cleanup_temp_dir(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_is_idempotent() {
        let path = create_temp_dir(DEFAULT_TEMP_PREFIX).await.unwrap();

        cleanup_temp_dir(&path).await.unwrap();
        cleanup_temp_dir(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_scoped_temp_dir_removed_on_drop() {
        let dir = ScopedTempDir::new("scoped-").unwrap();
        let path = dir.path().to_path_buf();
        assert!(path.is_dir());
        assert_eq!(dir.join("x.txt"), path.join("x.txt"));

        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_scoped_temp_dir_keep() {
        let dir = ScopedTempDir::new("kept-").unwrap();
        let path = dir.keep();
        assert!(path.is_dir());

        std::fs::remove_dir_all(&path).unwrap();
    }
}
