mod pipeline;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{LogFormat, init_tracing, load_config};
use pipeline::{ClientSnapshot, run_analysis, run_scenario};
use rust_decimal::Decimal;
use scenarios::ScenarioType;
use std::path::{Path, PathBuf};

/// The main entry point for the Valuebridge benchmark and valuation engine.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    // Held until exit so the file writer can flush.
    let _guard = init_tracing(&config.logging).context("Failed to initialise logging")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => {
            let snapshot = read_snapshot(&args.input)?;
            let report = run_analysis(&snapshot, &config)?;
            match args.format {
                OutputFormat::Table => render::print_analysis(&report),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Scenario(args) => {
            let snapshot = read_snapshot(&args.input)?;
            let result = run_scenario(&snapshot, &config, args.kind, args.target, args.retention)?;
            match args.format {
                OutputFormat::Table => render::print_scenario(&result),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Benchmarks a client against its industry and bridges the result to a business valuation.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured console log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gap analysis, valuation bridge and the operational scenarios.
    Analyze(AnalyzeArgs),
    /// Run a single what-if scenario.
    Scenario(ScenarioArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The client snapshot (JSON).
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser)]
struct ScenarioArgs {
    /// The client snapshot (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Which scenario to run.
    #[arg(long, value_enum)]
    kind: ScenarioType,

    /// The scenario's main target, e.g. a gross margin of 45 or 40 debtor days.
    #[arg(long)]
    target: Option<Decimal>,

    /// Client retention for the pricing scenario, percent.
    #[arg(long)]
    retention: Option<Decimal>,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

fn read_snapshot(path: &Path) -> anyhow::Result<ClientSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read client snapshot {}", path.display()))?;
    let snapshot: ClientSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse client snapshot {}", path.display()))?;
    tracing::info!(industry = %snapshot.industry_code, path = %path.display(), "Client snapshot loaded.");
    Ok(snapshot)
}
