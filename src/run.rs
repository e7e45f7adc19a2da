use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    time::Instant,
};
use tracing::info;

use crate::{config::Config, process, scan};

/// What a completed run did. Printed output is unaffected by it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub excluded: usize,
    pub not_files: usize,
}

/// Process the configured directory and print results to stdout.
pub fn run(config: &Config) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_in(config, &mut out)
}

/// Process every data file of `config.data_dir`, writing the filename and
/// then its oxidation degree to `out`, one line each.
///
/// The first file that cannot be opened or parsed aborts the run. Its
/// filename line has already been written and flushed by then; files later
/// in the listing produce no output.
#[tracing::instrument(level = "info", skip_all, fields(dir = %config.data_dir.display()))]
pub fn run_in<W: Write>(config: &Config, out: &mut W) -> Result<RunSummary> {
    let start = Instant::now();
    let selection = scan::data_files(&config.data_dir, &config.exclusions);
    info!(
        files = selection.files.len(),
        excluded = selection.excluded,
        "scanned data directory"
    );

    let mut summary = RunSummary {
        processed: 0,
        excluded: selection.excluded,
        not_files: selection.not_files,
    };

    for entry in &selection.files {
        writeln!(out, "{}", entry.name).context("writing filename to output")?;
        out.flush().context("flushing output")?;

        let degree = process::process_file(&entry.path)?;

        writeln!(out, "{}", degree).context("writing result to output")?;
        out.flush().context("flushing output")?;
        summary.processed += 1;
    }

    info!(processed = summary.processed, elapsed = ?start.elapsed(), "run complete");
    Ok(summary)
}
