// src/process/mod.rs
use anyhow::{bail, Context, Result};
use csv::{ByteRecord, ReaderBuilder};
use std::{fs, io::Cursor, path::Path};
use tracing::{debug, info, warn};

pub mod cell;
pub mod quoting;
pub mod raw_table;

pub use cell::parse_cell;
pub use raw_table::CsvTable;

/// Column holding the first-cycle charge capacity.
pub const OXD_COLUMN: usize = 0;
/// Column holding the first-cycle discharge capacity.
pub const CAP_COLUMN: usize = 2;

/// Open `path` and read every record into a [`CsvTable`].
///
/// The file is read without header handling: a label row becomes an ordinary
/// row whose cells later count as `0.0`. Every record must carry the same
/// number of fields as the first one, and at least `CAP_COLUMN + 1` of them.
/// Quoting is strict (see [`quoting::check_record`]). The file handle is
/// released before parsing starts.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<CsvTable> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("Failed to open data file: {:?}", path))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(Cursor::new(&data));

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut record = ByteRecord::new();
    for idx in 0usize.. {
        let start = rdr.position().byte() as usize;
        let more = rdr
            .read_byte_record(&mut record)
            .with_context(|| format!("CSV parse error in {:?} at record {}", path, idx))?;
        if !more {
            break;
        }
        let end = rdr.position().byte() as usize;
        quoting::check_record(data.get(start..end).unwrap_or_default())
            .with_context(|| format!("CSV parse error in {:?} at record {}", path, idx))?;

        if record.len() <= CAP_COLUMN {
            bail!(
                "CSV parse error in {:?} at record {}: expected at least {} fields, found {}",
                path,
                idx,
                CAP_COLUMN + 1,
                record.len()
            );
        }
        // instrument exports are not guaranteed to be UTF-8
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    debug!(rows = rows.len(), "loaded table");
    Ok(CsvTable { rows })
}

/// Running maxima of the two capacity columns for one file.
///
/// Both accumulators start at `0.0` and only move up, so a column with no
/// positive value reports `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningMaxima {
    pub oxd: f64,
    pub cap: f64,
}

impl Default for RunningMaxima {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningMaxima {
    pub fn new() -> Self {
        Self { oxd: 0.0, cap: 0.0 }
    }

    /// Fold one row into the maxima. Empty cells are ignored.
    pub fn observe(&mut self, row: &[String]) {
        if let Some(v) = row.get(OXD_COLUMN).and_then(|c| parse_cell(c)) {
            if self.oxd < v {
                self.oxd = v;
            }
        }
        if let Some(v) = row.get(CAP_COLUMN).and_then(|c| parse_cell(c)) {
            if self.cap < v {
                self.cap = v;
            }
        }
    }

    pub fn from_table(table: &CsvTable) -> Self {
        let mut maxima = Self::new();
        for row in &table.rows {
            maxima.observe(row);
        }
        maxima
    }

    /// `1 - oxd / cap`, unguarded: a zero `cap` gives `-inf` or `NaN`.
    pub fn oxidation_degree(&self) -> f64 {
        1.0 - self.oxd / self.cap
    }
}

/// Per-column maxima with the same empty-cell and zero-floor rules as
/// [`RunningMaxima`], for every column of the table.
pub fn column_maxima(table: &CsvTable) -> Vec<f64> {
    let mut maxima = vec![0.0_f64; table.width()];
    for row in &table.rows {
        for (max, raw) in maxima.iter_mut().zip(row) {
            if let Some(v) = parse_cell(raw) {
                if *max < v {
                    *max = v;
                }
            }
        }
    }
    maxima
}

/// Load one data file and compute its oxidation degree.
#[tracing::instrument(level = "info", skip(path), fields(file = %path.as_ref().display()))]
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<f64> {
    let maxima = {
        let table = load_table(&path)?;
        RunningMaxima::from_table(&table)
    };

    let degree = maxima.oxidation_degree();
    if maxima.cap == 0.0 {
        warn!(
            oxd = maxima.oxd,
            "column {} maximum is zero; oxidation degree is not finite", CAP_COLUMN
        );
    }
    info!(oxd = maxima.oxd, cap = maxima.cap, degree, "computed");
    Ok(degree)
}
