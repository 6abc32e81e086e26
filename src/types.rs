/*!
 * Core types and data structures for srcmerge
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Deduplicated set of absolute file paths queued for merging
///
/// Insertion order is not kept. Consumers that need a stable order use
/// [`PathSet::sorted`], which orders by the raw bytes of each path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: HashSet<PathBuf>,
}

impl PathSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning `false` if it was already present
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    /// Remove a path if present; absent paths are a no-op
    pub fn remove(&mut self, path: impl AsRef<Path>) -> bool {
        self.paths.remove(path.as_ref())
    }

    /// Empty the set
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Whether at least one path has been collected
    pub fn contains_any(&self) -> bool {
        !self.paths.is_empty()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.paths.contains(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in lexicographic byte order of the full path
    pub fn sorted(&self) -> Vec<&Path> {
        let mut sorted: Vec<&Path> = self.paths.iter().map(PathBuf::as_path).collect();
        sorted.sort_by(|a, b| {
            a.as_os_str()
                .as_encoded_bytes()
                .cmp(b.as_os_str().as_encoded_bytes())
        });
        sorted
    }
}

/// One file's contribution to a merged document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedFile {
    /// Absolute path of the source file
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    /// Label written in the header block
    pub label: String,
    /// Number of lines in the file content
    pub lines: usize,
    /// Number of characters in the file content
    pub chars: usize,
    /// Size of the content in bytes
    pub bytes: usize,
}

// Non-UTF-8 names are written with replacement characters, as labels are
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Result of a successful merge
#[derive(Debug, Clone)]
pub struct MergedDocument {
    /// The concatenated text
    pub text: String,
    /// Common ancestor used for labels, `None` when paths share no root
    pub root: Option<PathBuf>,
    /// Per-file details in merge order
    pub files: Vec<MergedFile>,
}
