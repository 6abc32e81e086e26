/*!
 * srcmerge - Merge source files into a single document
 *
 * Collects files (directly or by walking folders) into a deduplicated set and
 * concatenates them in a deterministic order, each behind a
 * `----relative/path----` header.
 */

pub mod clipboard;
pub mod collection;
pub mod config;
pub mod error;
pub mod logging;
pub mod merge;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use collection::Collector;
pub use config::Config;
pub use error::{MergeError, Result};
pub use merge::{merge, Merger};
pub use report::{MergeReport, ReportFormat, Reporter};
pub use types::{MergedDocument, MergedFile, PathSet};
pub use writer::Destination;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
