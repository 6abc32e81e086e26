/*!
 * Clipboard support for srcmerge
 *
 * Copies merged documents to the system clipboard by piping them into
 * whichever clipboard command the platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("{command} failed: {reason}")]
    CommandFailed {
        /// Clipboard command that was run
        command: &'static str,
        /// What went wrong
        reason: String,
    },

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Command-line clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOS,
    Windows,
    Termux,
}

impl ClipboardProvider {
    /// Program that reads the clipboard text from stdin
    pub fn program(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::Wayland => "wl-copy",
            Self::Xsel => "xsel",
            Self::Xclip => "xclip",
            Self::MacOS => "pbcopy",
            Self::Windows => "clip.exe",
            Self::Termux => "termux-clipboard-set",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["load-buffer", "-w", "-"],
            Self::Xsel => &["-b", "-i"],
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::Wayland | Self::MacOS | Self::Windows | Self::Termux => &[],
        }
    }

    /// Pipe `text` into this provider's command
    pub fn copy(self, text: &str) -> Result<()> {
        pipe_to(self.program(), self.args(), text)
    }
}

// Run `program` with `text` on its stdin. The child is always waited on,
// also when the write fails.
fn pipe_to(program: &'static str, args: &[&str], text: &str) -> Result<()> {
    let failed = |reason: String| ClipboardError::CommandFailed {
        command: program,
        reason,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| failed(format!("spawn: {}", e)))?;

    // Dropping stdin closes the pipe so the command sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin
            .write_all(text.as_bytes())
            .map_err(|e| failed(format!("write: {}", e))),
        None => Err(failed("stdin unavailable".to_string())),
    };
    if let Err(e) = written {
        let _ = child.wait();
        return Err(e);
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(failed(format!("exited with {}", status)))
    }
}

/// Copy text to the clipboard
///
/// Tries every provider available on this system in order of preference and
/// stops at the first one that succeeds.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let providers = available_providers();
    if providers.is_empty() {
        return Err(ClipboardError::NoClipboardFound);
    }

    let mut last_error = ClipboardError::NoClipboardFound;
    for provider in providers {
        match provider.copy(text) {
            Ok(()) => {
                debug!(?provider, "copied to clipboard");
                return Ok(());
            }
            Err(e) => {
                warn!(?provider, error = %e, "clipboard provider failed");
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// Check if a command exists on the system PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

/// Platform detection cache
static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "android") {
            "android"
        } else if cfg!(target_os = "linux") {
            if env::var_os("WSL_DISTRO_NAME").is_some() {
                "wsl"
            } else {
                "linux"
            }
        } else {
            "unknown"
        }
    })
}

/// Candidate providers for `platform`, before checking what is installed
fn candidates(platform: &str, in_tmux: bool, wayland: bool) -> Vec<ClipboardProvider> {
    let mut providers = Vec::new();

    if in_tmux {
        providers.push(ClipboardProvider::Tmux);
    }

    match platform {
        "macos" => providers.push(ClipboardProvider::MacOS),
        "windows" | "wsl" => providers.push(ClipboardProvider::Windows),
        "android" => providers.push(ClipboardProvider::Termux),
        "linux" => {
            if wayland {
                providers.push(ClipboardProvider::Wayland);
            }
            providers.push(ClipboardProvider::Xsel);
            providers.push(ClipboardProvider::Xclip);
        }
        _ => {}
    }

    providers
}

/// Providers that are actually installed, in order of preference
fn available_providers() -> Vec<ClipboardProvider> {
    let in_tmux = env::var_os("TMUX").is_some();
    let wayland = env::var_os("WAYLAND_DISPLAY").is_some();

    candidates(platform(), in_tmux, wayland)
        .into_iter()
        .filter(|provider| command_exists(provider.program()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_platform_is_cached() {
        let first = platform();
        assert!(["macos", "windows", "wsl", "linux", "android", "unknown"].contains(&first));
        assert_eq!(first, platform());
    }

    #[test]
    fn test_candidates_prefer_tmux() {
        let providers = candidates("linux", true, true);
        assert_eq!(
            providers,
            vec![
                ClipboardProvider::Tmux,
                ClipboardProvider::Wayland,
                ClipboardProvider::Xsel,
                ClipboardProvider::Xclip
            ]
        );
        assert_eq!(candidates("macos", false, false), vec![ClipboardProvider::MacOS]);
        assert!(candidates("unknown", false, false).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_command() {
        assert!(pipe_to("sh", &["-c", "cat > /dev/null"], "print('hi')\n").is_ok());

        match pipe_to("sh", &["-c", "exit 3"], "") {
            Err(ClipboardError::CommandFailed { command, reason }) => {
                assert_eq!(command, "sh");
                assert!(reason.starts_with("exited with"), "{reason}");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_command_that_closes_stdin() {
        // Larger than a pipe buffer, so the write fails once `true` exits
        let text = "x".repeat(4 * 1024 * 1024);
        match pipe_to("true", &[], &text) {
            Err(ClipboardError::CommandFailed { command, reason }) => {
                assert_eq!(command, "true");
                assert!(reason.starts_with("write"), "{reason}");
            }
            other => panic!("expected a write failure, got {:?}", other),
        }
    }

    #[test]
    #[ignore] // Requires a running tmux session
    fn test_tmux_clipboard() {
        if env::var_os("TMUX").is_none() || !command_exists("tmux") {
            return;
        }

        ClipboardProvider::Tmux
            .copy("Test text for tmux clipboard")
            .expect("Failed to copy to tmux clipboard");

        let output = Command::new("tmux")
            .args(["show-buffer"])
            .output()
            .expect("Failed to execute tmux show-buffer");
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            "Test text for tmux clipboard"
        );
    }
}
