//! In-memory filesystem mock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use super::MockFn;
use crate::error::{Error, Result};

/// Filesystem capability used by procedures.
pub trait FileSystem {
    /// Read a file's content.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist.
    fn read_file(&self, path: &str) -> Result<String>;

    /// Create or replace a file.
    fn write_file(&self, path: &str, content: &str);

    /// Create a directory.
    fn mkdir(&self, path: &str);

    /// List the immediate children of a directory.
    fn readdir(&self, path: &str) -> Vec<String>;

    /// Describe a path.
    ///
    /// # Errors
    ///
    /// Fails if nothing exists at `path`.
    fn stat(&self, path: &str) -> Result<FileStat>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &str) -> bool;
}

/// Kind of entry reported by [`FileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// Result of [`FileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// What kind of entry the path is.
    pub kind: FileKind,
}

impl FileStat {
    /// Whether the entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Whether the entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

type Files = Arc<Mutex<HashMap<String, String>>>;
type Dirs = Arc<Mutex<HashSet<String>>>;

/// An in-memory filesystem whose every operation is a recording mock.
///
/// State is a path-to-content map plus a set of directory paths. Directory
/// entries and file entries are independent: writing `/a/b.txt` does not
/// create `/a`, and `readdir` only looks at file paths.
#[derive(Debug, Clone)]
pub struct MockFs {
    files: Files,
    dirs: Dirs,
    /// `read_file(path)` calls.
    pub read_file: MockFn<String, Result<String>>,
    /// `write_file(path, content)` calls.
    pub write_file: MockFn<(String, String), ()>,
    /// `mkdir(path)` calls.
    pub mkdir: MockFn<String, ()>,
    /// `readdir(path)` calls.
    pub readdir: MockFn<String, Vec<String>>,
    /// `stat(path)` calls.
    pub stat: MockFn<String, Result<FileStat>>,
    /// `exists(path)` calls.
    pub exists: MockFn<String, bool>,
}

impl MockFs {
    /// Snapshot of the stored files.
    #[must_use]
    pub fn files(&self) -> HashMap<String, String> {
        self.files.lock().clone()
    }

    /// Snapshot of the stored directories.
    #[must_use]
    pub fn dirs(&self) -> HashSet<String> {
        self.dirs.lock().clone()
    }
}

/// Create an in-memory filesystem seeded with files and directories.
///
/// # Example
///
/// ```rust
/// use testkit_support::mock::{create_mock_fs, FileSystem};
///
/// let fs = create_mock_fs([("/d/x.txt", "x")], ["/d"]);
///
/// fs.write_file("/d/y.txt", "y");
/// assert_eq!(fs.read_file("/d/y.txt").unwrap(), "y");
/// assert!(fs.stat("/d").unwrap().is_dir());
/// assert_eq!(fs.write_file.call_count(), 1);
/// ```
pub fn create_mock_fs<F, P, C, D, S>(initial_files: F, initial_dirs: D) -> MockFs
where
    F: IntoIterator<Item = (P, C)>,
    P: Into<String>,
    C: Into<String>,
    D: IntoIterator<Item = S>,
    S: Into<String>,
{
    let files: Files = Arc::new(Mutex::new(
        initial_files
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect(),
    ));
    let dirs: Dirs = Arc::new(Mutex::new(
        initial_dirs.into_iter().map(Into::into).collect(),
    ));

    let read_file = {
        let files = Arc::clone(&files);
        MockFn::with_implementation(move |path: String| {
            files.lock().get(&path).cloned().ok_or_else(|| {
                trace!(%path, "mock read of missing file");
                Error::NotFound(format!("no such file: {path}"))
            })
        })
    };

    let write_file = {
        let files = Arc::clone(&files);
        MockFn::with_implementation(move |(path, content): (String, String)| {
            files.lock().insert(path, content);
        })
    };

    let mkdir = {
        let dirs = Arc::clone(&dirs);
        MockFn::with_implementation(move |path: String| {
            dirs.lock().insert(path);
        })
    };

    let readdir = {
        let files = Arc::clone(&files);
        MockFn::with_implementation(move |path: String| list_children(&files.lock(), &path))
    };

    let stat = {
        let files = Arc::clone(&files);
        let dirs = Arc::clone(&dirs);
        MockFn::with_implementation(move |path: String| {
            if dirs.lock().contains(&path) {
                Ok(FileStat {
                    kind: FileKind::Directory,
                })
            } else if files.lock().contains_key(&path) {
                Ok(FileStat {
                    kind: FileKind::File,
                })
            } else {
                Err(Error::NotFound(format!("no such file or directory: {path}")))
            }
        })
    };

    let exists = {
        let files = Arc::clone(&files);
        let dirs = Arc::clone(&dirs);
        MockFn::with_implementation(move |path: String| {
            files.lock().contains_key(&path) || dirs.lock().contains(&path)
        })
    };

    MockFs {
        files,
        dirs,
        read_file,
        write_file,
        mkdir,
        readdir,
        stat,
        exists,
    }
}

/// First path segment below `dir` of every stored file, each listed once.
fn list_children(files: &HashMap<String, String>, dir: &str) -> Vec<String> {
    let prefix = format!("{dir}/");
    let mut entries: Vec<String> = Vec::new();

    for file in files.keys() {
        let Some(rest) = file.strip_prefix(&prefix) else {
            continue;
        };
        let name = rest.split('/').next().unwrap_or_default();
        if !name.is_empty() && !entries.iter().any(|e| e == name) {
            entries.push(name.to_string());
        }
    }

    entries
}

impl FileSystem for MockFs {
    fn read_file(&self, path: &str) -> Result<String> {
        self.read_file.call(path.to_string())
    }

    fn write_file(&self, path: &str, content: &str) {
        self.write_file.call((path.to_string(), content.to_string()));
    }

    fn mkdir(&self, path: &str) {
        self.mkdir.call(path.to_string());
    }

    fn readdir(&self, path: &str) -> Vec<String> {
        self.readdir.call(path.to_string())
    }

    fn stat(&self, path: &str) -> Result<FileStat> {
        self.stat.call(path.to_string())
    }

    fn exists(&self, path: &str) -> bool {
        self.exists.call(path.to_string())
    }
}
