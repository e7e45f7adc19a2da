//! Oxidation-degree batch calculator.
//!
//! Scans a directory of charge/discharge CSV tables and, for each one, prints
//! the filename followed by `1 - max(column 0) / max(column 2)`.

pub mod config;
pub mod process;
pub mod run;
pub mod scan;

pub use config::Config;
pub use run::{run, run_in, RunSummary};
