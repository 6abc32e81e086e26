/*!
 * File collection: turning files and folders into a set of source paths
 */

use std::path::{Path, PathBuf};

use glob_match::glob_match;
use ignore::WalkBuilder;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::types::PathSet;
use crate::utils::absolute_path;

/// Collects qualifying files into a [`PathSet`]
pub struct Collector {
    /// Collector configuration
    config: Config,
}

impl Collector {
    /// Create a new collector
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Add a file, or every qualifying file below a folder, to `set`
    ///
    /// Paths that do not exist, files with another extension and anything
    /// that is neither a file nor a folder are ignored. Returns how many
    /// paths were newly inserted.
    ///
    /// Paths are made absolute without touching the filesystem: `.` is
    /// dropped but `..` is kept, so `app/../setup.py` and `setup.py` are two
    /// entries and the file is merged twice.
    pub fn add_path(&self, set: &mut PathSet, path: impl AsRef<Path>) -> usize {
        let path = match absolute_path(path.as_ref()) {
            Ok(path) => path,
            Err(e) => {
                debug!(path = %path.as_ref().display(), error = %e, "cannot make path absolute");
                return 0;
            }
        };

        if path.is_file() {
            if self.matches_extension(&path) && set.insert(path.clone()) {
                debug!(path = %path.display(), "added file");
                return 1;
            }
            debug!(path = %path.display(), "ignored file");
            return 0;
        }

        if path.is_dir() {
            let added = self
                .qualifying_files(&path)
                .filter(|file| set.insert(file.clone()))
                .count();
            debug!(path = %path.display(), added, "expanded folder");
            return added;
        }

        debug!(path = %path.display(), "ignored path that is neither file nor folder");
        0
    }

    /// Whether adding `path` would contribute at least one qualifying file
    pub fn accepts(&self, path: impl AsRef<Path>) -> bool {
        let Ok(path) = absolute_path(path.as_ref()) else {
            return false;
        };

        if path.is_file() {
            self.matches_extension(&path)
        } else if path.is_dir() {
            self.qualifying_files(&path).next().is_some()
        } else {
            false
        }
    }

    /// Check if a file name ends with one of the configured extensions
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.config
            .extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }

    /// Check if a walked entry should be skipped based on ignore patterns
    pub fn should_ignore(&self, path: &Path) -> bool {
        is_ignored(&self.config.ignore_patterns, path)
    }

    /// Lazily walk `dir` and yield every qualifying file below it
    fn qualifying_files<'a>(&'a self, dir: &Path) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        if self.config.respect_gitignore {
            let mut walker = WalkBuilder::new(dir);
            walker
                .standard_filters(false)
                .git_ignore(true)
                .git_exclude(true)
                .parents(true)
                .require_git(false)
                .follow_links(self.config.follow_symlinks)
                .max_depth(self.config.max_depth);

            if let Some(ignore_file) = &self.config.gitignore_path {
                if let Some(e) = walker.add_ignore(ignore_file) {
                    warn!(path = %ignore_file.display(), error = %e, "failed to load ignore file");
                }
            }

            let patterns = self.config.ignore_patterns.clone();
            walker.filter_entry(move |entry| entry.depth() == 0 || !is_ignored(&patterns, entry.path()));

            Box::new(
                walker
                    .build()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry.into_path()),
                        Err(e) => {
                            debug!(error = %e, "skipping unreadable entry");
                            None
                        }
                    })
                    .filter(move |path| self.is_qualifying_file(path)),
            )
        } else {
            let mut walker = WalkDir::new(dir).follow_links(self.config.follow_symlinks);
            if let Some(depth) = self.config.max_depth {
                walker = walker.max_depth(depth);
            }

            Box::new(
                walker
                    .into_iter()
                    .filter_entry(move |entry| entry.depth() == 0 || !self.should_ignore(entry.path()))
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry.into_path()),
                        Err(e) => {
                            debug!(error = %e, "skipping unreadable entry");
                            None
                        }
                    })
                    .filter(move |path| self.is_qualifying_file(path)),
            )
        }
    }

    /// Regular files (or symlinks to them) carrying a configured extension
    fn is_qualifying_file(&self, path: &Path) -> bool {
        self.matches_extension(path) && path.is_file()
    }
}

fn is_ignored(patterns: &[String], path: &Path) -> bool {
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    patterns
        .iter()
        .any(|pattern| glob_match(pattern, &file_name))
}
