//! # CLI Module
//!
//! Command-line interface for the drive reaper.
//!
//! ## Usage
//! ```bash
//! # Scan a catalog snapshot for duplicates
//! drive-reaper scan catalog.json
//!
//! # Smaller pages with a delay between them
//! drive-reaper scan catalog.json --page-size 100 --page-delay-ms 250
//!
//! # JSON output
//! drive-reaper scan catalog.json --output json
//!
//! # Write the HTML report next to the snapshot
//! drive-reaper scan catalog.json --html report.html
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use drive_reaper::core::catalog::{SnapshotCatalog, DEFAULT_PAGE_SIZE};
use drive_reaper::core::dedup::{FirstSeen, KeeperPolicy, LastSeen};
use drive_reaper::core::report::{render_html, render_text};
use drive_reaper::core::scan::{ScanOutcome, ScanRunner};
use drive_reaper::error::{ReaperError, Result};
use drive_reaper::events::{Event, EventChannel, ListEvent, ScanEvent};
use drive_reaper::notify::{report_message, LoggingNotifier, Notifier};
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Drive Reaper - find duplicate files worth reclaiming
#[derive(Parser, Debug)]
#[command(name = "drive-reaper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a catalog snapshot for duplicate files
    Scan {
        /// Path to a JSON catalog snapshot (array of file records)
        snapshot: PathBuf,

        /// Records per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Milliseconds to wait between page fetches
        #[arg(long, default_value = "0")]
        page_delay_ms: u64,

        /// Which member of each duplicate group to keep
        #[arg(long, default_value = "first")]
        keep: KeepChoice,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Write an HTML report to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Deliver the rendered report to this address (logged delivery)
        #[arg(long)]
        recipient: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeepChoice {
    /// Keep the first-seen file in each group (default)
    First,
    /// Keep the last-seen file in each group
    Last,
}

impl KeepChoice {
    fn policy(self) -> Arc<dyn KeeperPolicy> {
        match self {
            KeepChoice::First => Arc::new(FirstSeen),
            KeepChoice::Last => Arc::new(LastSeen),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Reapable file ids only, one per line
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            snapshot,
            page_size,
            page_delay_ms,
            keep,
            output,
            html,
            recipient,
        } => run_scan(
            snapshot,
            page_size,
            page_delay_ms,
            keep,
            output,
            html,
            recipient,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    snapshot: PathBuf,
    page_size: usize,
    page_delay_ms: u64,
    keep: KeepChoice,
    output: OutputFormat,
    html: Option<PathBuf>,
    recipient: Option<String>,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Drive Reaper").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
    }

    let mut catalog = SnapshotCatalog::load(&snapshot, page_size)?;

    let mut builder = ScanRunner::builder().policy(keep.policy());
    if page_delay_ms > 0 {
        builder = builder.page_delay(Duration::from_millis(page_delay_ms));
    }
    let runner = builder.build();

    let (sender, receiver) = EventChannel::new();
    let progress = make_progress(matches!(output, OutputFormat::Pretty));

    let outcome = std::thread::scope(|scope| {
        let watcher = scope.spawn(move || {
            for event in receiver.iter() {
                match event {
                    Event::List(ListEvent::PageFetched {
                        page_index,
                        total_records,
                        ..
                    }) => {
                        progress.set_message(format!(
                            "page {} - {} files scanned",
                            page_index + 1,
                            total_records
                        ));
                        progress.tick();
                    }
                    Event::Scan(ScanEvent::Completed { .. })
                    | Event::Scan(ScanEvent::Failed { .. }) => {
                        progress.finish_and_clear();
                    }
                    _ => {}
                }
            }
        });

        let outcome = runner.run_with_events(&mut catalog, &sender);
        drop(sender);
        watcher.join().ok();
        outcome
    })?;

    print_report(&term, &outcome, output)?;

    if let Some(path) = html {
        std::fs::write(&path, render_html(&outcome.report, None)).map_err(|e| {
            ReaperError::Config(format!("could not write HTML report to {}: {e}", path.display()))
        })?;
        term.write_line(&format!("HTML report written to {}", path.display()))
            .ok();
    }

    if let Some(recipient) = recipient {
        let message = report_message(&outcome.report, None);
        LoggingNotifier.send(&recipient, &message)?;
    }

    Ok(())
}

fn make_progress(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar
}

fn print_report(term: &Term, outcome: &ScanOutcome, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Pretty => {
            let report = &outcome.report;
            term.write_line("").ok();
            println!("{}", render_text(report, None));
            println!(
                "{} pages fetched in {} ms",
                outcome.pages_fetched, outcome.duration_ms
            );
            if report.has_duplicates() {
                println!(
                    "{}",
                    style(format!(
                        "Reclaimable: {}",
                        format_size(report.reapable_bytes, DECIMAL)
                    ))
                    .green()
                    .bold()
                );
            } else {
                println!("{}", style("No duplicates found.").green());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.report)
                .map_err(|e| ReaperError::Config(format!("could not serialize report: {e}")))?;
            println!("{json}");
        }
        OutputFormat::Minimal => {
            for id in &outcome.report.reapable_file_ids {
                println!("{id}");
            }
        }
    }
    Ok(())
}
