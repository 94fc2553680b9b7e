//! Keep Models - Main Entry Point

use alerting::NoiseEvaluator;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keep_cli::{
    annotate_presets, cel_queries, delete_receipt, enrich_alert, init_logging, normalize_alerts,
    system_presets, Settings,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "keep-models", version, about = "Normalize alerts and inspect presets")]
struct Cli {
    /// Settings file (toml, yaml or json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Paths may be `-` to read stdin.
#[derive(Debug, Subcommand)]
enum Command {
    /// Validate alert payloads and print them normalized
    Normalize { alerts: PathBuf },
    /// Tombstone or restore a receipt of an alert
    Delete { alert: PathBuf, request: PathBuf },
    /// Merge enrichments into an alert
    Enrich { alert: PathBuf, request: PathBuf },
    /// Print the cel query of each preset
    Cel { presets: PathBuf },
    /// Attach noise fields to presets given their matched alerts
    Noise { presets: PathBuf, alerts: PathBuf },
    /// Print the reserved system presets
    SystemPresets,
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_logging(&settings.log_level)?;

    info!("=== keep-models v{} ===", env!("CARGO_PKG_VERSION"));

    let output = match cli.command {
        Command::Normalize { alerts } => normalize_alerts(&read_input(&alerts)?)?,
        Command::Delete { alert, request } => {
            delete_receipt(&read_input(&alert)?, &read_input(&request)?)?
        }
        Command::Enrich { alert, request } => {
            enrich_alert(&read_input(&alert)?, &read_input(&request)?)?
        }
        Command::Cel { presets } => cel_queries(&read_input(&presets)?)?,
        Command::Noise { presets, alerts } => {
            let evaluator = NoiseEvaluator::new(settings.noise.clone());
            annotate_presets(&read_input(&presets)?, &read_input(&alerts)?, &evaluator)?
        }
        Command::SystemPresets => system_presets()?,
    };

    println!("{output}");
    Ok(())
}
