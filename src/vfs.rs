//! Filesystem collaborator for graph construction.
//!
//! Graph traversal only needs two capabilities from the filesystem: an
//! existence check and a text read. They are factored behind the
//! [`FileSystem`] trait so the graph can be built against the real disk
//! ([`OsFileSystem`]) or an in-memory fixture ([`MemoryFileSystem`]) in
//! tests and benchmarks.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Filesystem capabilities required by graph traversal.
pub trait FileSystem {
    /// Returns true if `path` exists.
    ///
    /// Existence is intentionally broader than "is a readable file":
    /// a path that exists but cannot be read as text surfaces as a read
    /// error during traversal, not as a nonexistent (external) module.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the full text content of the file at `path`.
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// In-memory [`FileSystem`] fixture.
///
/// Paths are normalized on insert and lookup, so `/src/./a.js` and
/// `/src/a.js` refer to the same entry.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use modgraph::vfs::{FileSystem, MemoryFileSystem};
///
/// let mut fs = MemoryFileSystem::new();
/// fs.insert("/src/index.js", "import './a.js';");
///
/// assert!(fs.exists(Path::new("/src/index.js")));
/// assert!(!fs.exists(Path::new("/src/missing.js")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    /// Creates an empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given text content, replacing any previous
    /// content at the same path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into().clean(), content.into());
    }

    /// Removes a file, returning its content if it was present.
    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.files.remove(&path.to_path_buf().clean())
    }

    /// Returns the number of files in the fixture.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the fixture holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&path.to_path_buf().clean())
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&path.to_path_buf().clean())
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })
    }
}
