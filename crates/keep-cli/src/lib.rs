//! Keep Models CLI
//!
//! Command-line access to the alert and preset models: payload normalization,
//! tombstone and enrichment requests, cel query extraction, and noise fields.

mod commands;
mod settings;

pub use commands::{
    annotate_presets, cel_queries, delete_receipt, enrich_alert, normalize_alerts, system_presets,
};
pub use settings::Settings;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging on stderr, keeping stdout for command output
pub fn init_logging(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("Invalid log level {level:?}"))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}
