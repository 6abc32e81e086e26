/*!
 * Merge engine: concatenates collected files behind relative-path headers
 */

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::error::{MergeError, Result};
use crate::types::{MergedDocument, MergedFile, PathSet};

/// Merges the files of a [`PathSet`] into one document
pub struct Merger {
    /// Progress bar advanced once per merged file
    progress: Arc<ProgressBar>,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(Arc::new(ProgressBar::hidden()))
    }
}

impl Merger {
    /// Create a new merger reporting to `progress`
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self { progress }
    }

    /// Merge every path in `paths`
    ///
    /// Files are visited in byte order of their full path. Each one is
    /// preceded by a `----label----` header, where the label is the path
    /// relative to the deepest directory shared by all files. Any read
    /// failure aborts the whole merge.
    pub fn merge(&self, paths: &PathSet) -> Result<MergedDocument> {
        if !paths.contains_any() {
            return Err(MergeError::EmptyInput);
        }

        let sorted = paths.sorted();
        let root = labeling_root(sorted.iter().copied());
        debug!(root = ?root, files = sorted.len(), "merging");

        self.progress.set_length(sorted.len() as u64);

        let mut text = String::new();
        let mut files = Vec::with_capacity(sorted.len());

        for path in sorted {
            let label = label_for(path, root.as_deref());
            self.progress.set_message(label.clone());

            text.push_str(&header(&label));

            let content = fs::read_to_string(path).map_err(|source| MergeError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            text.push_str(&content);

            files.push(MergedFile {
                path: path.to_path_buf(),
                label,
                lines: content.lines().count(),
                chars: content.chars().count(),
                bytes: content.len(),
            });
            self.progress.inc(1);
        }

        info!(files = files.len(), bytes = text.len(), "merge complete");

        Ok(MergedDocument { text, root, files })
    }
}

/// Merge `paths` without progress reporting
pub fn merge(paths: &PathSet) -> Result<MergedDocument> {
    Merger::default().merge(paths)
}

/// Header block written before each file's content
pub fn header(label: &str) -> String {
    format!("\n\n----{}----\n\n", label)
}

/// Deepest directory that is an ancestor of every path
///
/// Returns `None` when the paths share no leading component, e.g. when
/// they live on different drives, or when there are no paths at all.
pub fn labeling_root<'a, I>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut paths = paths.into_iter();
    let mut common: Vec<Component<'a>> = paths.next()?.parent()?.components().collect();

    for path in paths {
        let parent = path.parent()?;
        let shared = common
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }

    if common.is_empty() {
        None
    } else {
        Some(common.into_iter().collect())
    }
}

/// Label for `path` under `root`, using `/` as separator
///
/// Without a root, or for a path outside it, the full path is the label.
pub fn label_for(path: &Path, root: Option<&Path>) -> String {
    let Some(relative) = root.and_then(|root| path.strip_prefix(root).ok()) else {
        return path.to_string_lossy().into_owned();
    };

    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(raw: &[&'static str]) -> Vec<&'static Path> {
        raw.iter().map(|p| Path::new(*p)).collect()
    }

    #[test]
    fn test_labeling_root_of_siblings() {
        let root = labeling_root(paths(&["/a/b/x.py", "/a/c/y.py"]));
        assert_eq!(root, Some(PathBuf::from("/a")));
    }

    #[test]
    fn test_labeling_root_of_single_file_is_parent() {
        let root = labeling_root(paths(&["/a/b/x.py"]));
        assert_eq!(root, Some(PathBuf::from("/a/b")));
    }

    #[test]
    fn test_labeling_root_does_not_split_names() {
        // "/a/bc" shares the string prefix "/a/b" but not the directory
        let root = labeling_root(paths(&["/a/b/x.py", "/a/bc/y.py"]));
        assert_eq!(root, Some(PathBuf::from("/a")));
    }

    #[cfg(unix)]
    #[test]
    fn test_labeling_root_falls_back_to_filesystem_root() {
        let root = labeling_root(paths(&["/a/x.py", "/b/y.py"]));
        assert_eq!(root, Some(PathBuf::from("/")));
        assert_eq!(label_for(Path::new("/a/x.py"), root.as_deref()), "a/x.py");
    }

    #[test]
    fn test_labeling_root_without_shared_component() {
        assert_eq!(labeling_root(paths(&["/a/x.py", "b/y.py"])), None);
        assert_eq!(labeling_root(Vec::<&Path>::new()), None);
    }

    #[test]
    fn test_label_for() {
        let root = Path::new("/a");
        assert_eq!(label_for(Path::new("/a/b/x.py"), Some(root)), "b/x.py");
        assert_eq!(label_for(Path::new("/a/b/x.py"), None), "/a/b/x.py");
        assert_eq!(label_for(Path::new("/z/x.py"), Some(root)), "/z/x.py");
    }

    #[test]
    fn test_header() {
        assert_eq!(header("b/x.py"), "\n\n----b/x.py----\n\n");
    }

    #[test]
    fn test_merge_empty_set() {
        let err = merge(&PathSet::new()).unwrap_err();
        assert!(err.is_empty_input());
    }
}
