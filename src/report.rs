/*!
 * Reporting functionality for srcmerge
 *
 * Summarizes a merge as console tables (via the tabled crate) or as JSON.
 */

use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};
use tracing::warn;

use crate::types::{MergedDocument, MergedFile};
use crate::utils::{format_file_size, format_number};
use crate::writer::Destination;

/// Above this many files only the largest ones are listed
const FULL_LISTING_LIMIT: usize = 15;
const TOP_FILES: usize = 10;

/// Statistics for a completed merge
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Where the document was delivered
    pub destinations: Vec<String>,
    /// Time taken to collect, merge and write
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    /// Number of files merged
    pub files_merged: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Size of the merged document in bytes
    pub total_bytes: usize,
    /// Details for each file, in merge order
    pub files: Vec<MergedFile>,
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

impl MergeReport {
    /// Build a report for `document` delivered to `destinations`
    pub fn new(document: &MergedDocument, destinations: &[Destination], duration: Duration) -> Self {
        Self {
            destinations: destinations.iter().map(ToString::to_string).collect(),
            duration,
            files_merged: document.files.len(),
            total_lines: document.files.iter().map(|f| f.lines).sum(),
            total_chars: document.files.iter().map(|f| f.chars).sum(),
            total_bytes: document.text.len(),
            files: document.files.clone(),
        }
    }

    /// Estimated LLM tokens for the merged document
    pub fn estimated_tokens(&self) -> usize {
        self.total_chars / 4
    }
}

/// Format of the report output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Console tables
    #[default]
    Table,
    /// A single JSON object
    Json,
    /// No report
    Off,
}

/// Report generator for merge results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string, `None` when reporting is off
    pub fn generate_report(&self, report: &MergeReport) -> Option<String> {
        match self.format {
            ReportFormat::Table => Some(self.generate_console_report(report)),
            ReportFormat::Json => match serde_json::to_string_pretty(report) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(error = %e, "failed to serialize report");
                    None
                }
            },
            ReportFormat::Off => None,
        }
    }

    /// Print the report to stderr, leaving stdout to the merged document
    pub fn print_report(&self, report: &MergeReport) {
        if let Some(text) = self.generate_report(report) {
            eprintln!("\n{}", text);
        }
    }

    // Shorten a label to `max_len` characters, keeping its trailing segments
    fn format_label(&self, label: &str, max_len: usize) -> String {
        if label.chars().count() <= max_len {
            return label.to_string();
        }

        let mut kept: Vec<&str> = Vec::new();
        let mut len = 3; // "..."
        for segment in label.rsplit('/') {
            let segment_len = segment.chars().count() + 1;
            if len + segment_len > max_len {
                break;
            }
            kept.push(segment);
            len += segment_len;
        }

        if kept.is_empty() {
            let tail: String = label
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        kept.reverse();
        format!(".../{}", kept.join("/"))
    }

    fn create_summary_table(&self, report: &MergeReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output",
                value: report.destinations.join(", "),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Merged",
                value: format_number(report.files_merged),
            },
            SummaryRow {
                key: "📝 Total Lines",
                value: format_number(report.total_lines),
            },
            SummaryRow {
                key: "💾 Size",
                value: format_file_size(report.total_bytes as u64),
            },
            SummaryRow {
                key: "📦 LLM Tokens",
                value: format!("{} tokens (estimated)", format_number(report.estimated_tokens())),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &MergeReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File")]
            label: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<&MergedFile> = report.files.iter().collect();
        if files.len() > FULL_LISTING_LIMIT {
            files.sort_by(|a, b| b.chars.cmp(&a.chars));
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|file| FileRow {
                label: self.format_label(&file.label, 60),
                lines: format_number(file.lines),
                tokens: format_number(file.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &MergeReport) -> String {
        let files_title = if report.files.len() > FULL_LISTING_LIMIT {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  MERGED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "✅  MERGE COMPLETE",
            self.create_summary_table(report)
        )
    }
}
