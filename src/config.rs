/*!
 * Configuration handling for srcmerge
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::report::ReportFormat;
use crate::utils::normalize_extension;
use crate::writer::Destination;

/// Extension collected when none is configured
pub const DEFAULT_EXTENSION: &str = ".py";

/// Command-line arguments for srcmerge
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "srcmerge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merge source files into a single document with relative-path headers",
    long_about = "Collects source files from the given files and folders, then concatenates them into one document where each file is preceded by a ----relative/path---- header. The result is saved, copied to the clipboard, or printed."
)]
pub struct Args {
    /// Files or folders to collect
    pub paths: Vec<String>,

    /// Save the merged document to this file
    #[clap(short, long)]
    pub output: Option<String>,

    /// Copy the merged document to the system clipboard
    #[clap(long)]
    pub clip: bool,

    /// Comma-separated list of file extensions to collect
    #[clap(long = "ext", value_delimiter = ',', default_value = DEFAULT_EXTENSION)]
    pub extensions: Vec<String>,

    /// Comma-separated list of file name patterns to skip while walking folders
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Remove a collected file before merging (repeatable)
    #[clap(long, value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Honor .gitignore files while walking folders
    #[clap(long)]
    pub respect_gitignore: bool,

    /// Additional ignore file in .gitignore syntax
    #[clap(long)]
    pub gitignore_path: Option<String>,

    /// Descend into symlinked folders
    #[clap(long)]
    pub follow_symlinks: bool,

    /// Maximum folder depth to walk
    #[clap(long)]
    pub max_depth: Option<usize>,

    /// Print the collected files instead of merging them
    #[clap(long)]
    pub list: bool,

    /// Summary printed after a merge
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Files or folders to collect
    pub inputs: Vec<PathBuf>,

    /// Output file path
    pub output_file: Option<PathBuf>,

    /// Copy output to clipboard
    pub clip: bool,

    /// Extensions a file name must end with, each with a leading dot
    pub extensions: Vec<String>,

    /// Patterns to skip while walking
    pub ignore_patterns: Vec<String>,

    /// Paths removed from the collection before merging
    pub exclude: Vec<PathBuf>,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Path to custom ignore file
    pub gitignore_path: Option<PathBuf>,

    /// Whether to descend into symlinked directories
    pub follow_symlinks: bool,

    /// Maximum walk depth (unbounded if None)
    pub max_depth: Option<usize>,

    /// List collected files instead of merging
    pub list: bool,

    /// Report format
    pub report: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_file: None,
            clip: false,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            ignore_patterns: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: false,
            gitignore_path: None,
            follow_symlinks: false,
            max_depth: None,
            list: false,
            report: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            inputs: args.paths.into_iter().map(PathBuf::from).collect(),
            output_file: args.output.map(PathBuf::from),
            clip: args.clip,
            extensions: args
                .extensions
                .iter()
                .filter(|ext| !ext.trim().is_empty())
                .map(|ext| normalize_extension(ext))
                .collect(),
            ignore_patterns: args.ignore_patterns,
            exclude: args.exclude.into_iter().map(PathBuf::from).collect(),
            respect_gitignore: args.respect_gitignore,
            gitignore_path: args.gitignore_path.map(PathBuf::from),
            follow_symlinks: args.follow_symlinks,
            max_depth: args.max_depth,
            list: args.list,
            report: args.report,
        }
    }

    /// Where the merged document goes; stdout when nothing else was asked for
    pub fn destinations(&self) -> Vec<Destination> {
        let mut destinations = Vec::new();
        if let Some(path) = &self.output_file {
            destinations.push(Destination::File(path.clone()));
        }
        if self.clip {
            destinations.push(Destination::Clipboard);
        }
        if destinations.is_empty() {
            destinations.push(Destination::Stdout);
        }
        destinations
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.extensions.is_empty(),
            Config,
            "at least one file extension is required"
        );

        if let Some(output) = &self.output_file {
            ensure!(
                !output.is_dir(),
                InvalidArgument,
                "output path is a directory: {}",
                output.display()
            );
            if let Some(parent) = output.parent() {
                ensure!(
                    parent.as_os_str().is_empty() || parent.is_dir(),
                    Config,
                    "output directory not found: {}",
                    parent.display()
                );
            }
        }

        if let Some(path) = &self.gitignore_path {
            ensure!(
                path.is_file(),
                Config,
                "custom ignore file not found: {}",
                path.display()
            );
        }

        Ok(())
    }
}
