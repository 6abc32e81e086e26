//! Error handling for srcmerge
//!
//! Every fallible operation in the crate reports through [`MergeError`].
//! A failed merge or save never touches the collected path set.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Error type for collection, merge and output operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// No files were registered when a merge was requested
    #[error("No files to merge; add at least one file or folder first")]
    EmptyInput,

    /// A registered file could not be opened or decoded as UTF-8
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The offending file
        path: PathBuf,
        /// Underlying cause
        source: io::Error,
    },

    /// The chosen destination could not be written
    #[error("Failed to write {}: {source}", destination.display())]
    Write {
        /// Destination that failed
        destination: PathBuf,
        /// Underlying cause
        source: io::Error,
    },

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for srcmerge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Creates a MergeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::MergeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl MergeError {
    /// Whether this is the "nothing collected" notice rather than a failure
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

impl From<MergeError> for io::Error {
    fn from(err: MergeError) -> Self {
        let kind = match &err {
            MergeError::Read { source, .. } | MergeError::Write { source, .. } => source.kind(),
            MergeError::Config(_) | MergeError::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}
