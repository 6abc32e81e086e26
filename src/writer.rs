/*!
 * Output of merged documents
 */

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::clipboard;
use crate::error::{MergeError, Result};

/// Where a merged document is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Create or overwrite a file
    File(PathBuf),
    /// System clipboard
    Clipboard,
    /// Standard output
    Stdout,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Clipboard => f.write_str("clipboard"),
            Self::Stdout => f.write_str("stdout"),
        }
    }
}

/// Deliver `text` to `destination`
///
/// A failure leaves `text` untouched so the caller can retry elsewhere.
pub fn write(destination: &Destination, text: &str) -> Result<()> {
    match destination {
        Destination::File(path) => save(path, text),
        Destination::Clipboard => {
            clipboard::copy_to_clipboard(text)?;
            info!("copied merged document to clipboard");
            Ok(())
        }
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| MergeError::Write {
                    destination: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}

/// Save `text` as UTF-8 to `path`, creating or overwriting it
pub fn save(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| MergeError::Write {
        destination: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "saved merged document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_overwrites() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("merged.py");
        fs::write(&path, "old content that is longer").unwrap();

        save(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("merged.py");
        let text = String::from("\n\n----x.py----\n\nprint(1)\n");

        match write(&Destination::File(path.clone()), &text) {
            Err(MergeError::Write { destination, .. }) => assert_eq!(destination, path),
            other => panic!("expected write error, got {:?}", other),
        }
        assert!(!path.exists());
        assert_eq!(text, "\n\n----x.py----\n\nprint(1)\n");
    }

    #[test]
    fn test_destination_display() {
        assert_eq!(Destination::Clipboard.to_string(), "clipboard");
        assert_eq!(Destination::Stdout.to_string(), "stdout");
        assert_eq!(
            Destination::File(PathBuf::from("out/merged.py")).to_string(),
            "out/merged.py"
        );
    }
}
