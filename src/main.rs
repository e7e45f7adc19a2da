use anyhow::Result;
use oxd::Config;
use std::io;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout carries results only) ─────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    // ─── 2) configuration ─────────────────────────────────────────────
    let config = Config::from_env()?;
    debug!(?config, "configuration loaded");

    // ─── 3) process the data directory ────────────────────────────────
    let summary = oxd::run(&config)?;
    info!(
        processed = summary.processed,
        excluded = summary.excluded,
        skipped = summary.not_files,
        "finished"
    );

    Ok(())
}
