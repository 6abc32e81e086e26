/*!
 * Command-line interface for srcmerge
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use srcmerge::config::{Args, Config};
use srcmerge::utils::absolute_path;
use srcmerge::{logging, writer, Collector, MergeError, MergeReport, Merger, PathSet, Reporter};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> srcmerge::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    logging::init(args.verbose);

    let config = Config::from_args(args);
    config.validate()?;

    let start_time = Instant::now();

    // Collect
    let collector = Collector::new(config.clone());
    let mut paths = PathSet::new();
    for input in &config.inputs {
        if collector.add_path(&mut paths, input) == 0 {
            warn!(path = %input.display(), "nothing collected");
        }
    }
    for excluded in &config.exclude {
        let removed = absolute_path(excluded)
            .map(|path| paths.remove(path))
            .unwrap_or(false);
        if !removed {
            warn!(path = %excluded.display(), "excluded path was not collected");
        }
    }

    if config.list {
        for path in paths.sorted() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    // Merge
    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_prefix("📄 Merging");
    progress.enable_steady_tick(Duration::from_millis(100));

    let merger = Merger::new(Arc::new(progress.clone()));
    let document = match merger.merge(&paths) {
        Ok(document) => document,
        Err(MergeError::EmptyInput) => {
            progress.finish_and_clear();
            eprintln!(
                "No files to merge. Add at least one file ending with {} or a folder containing one.",
                config.extensions.join(", ")
            );
            return Ok(());
        }
        Err(e) => {
            progress.finish_and_clear();
            return Err(e);
        }
    };
    progress.finish_and_clear();

    // Deliver
    let destinations = config.destinations();
    for destination in &destinations {
        writer::write(destination, &document.text)?;
    }

    let report = MergeReport::new(&document, &destinations, start_time.elapsed());
    Reporter::new(config.report).print_report(&report);

    Ok(())
}
