//! # QuantLaxmi Quantum Regime Runner
//!
//! CLI surface over `quantlaxmi-qregime`.
//!
//! ## Commands
//! - `eval` - Evaluate four raw statistics
//! - `run` - Derive statistics from a CSV close panel, then evaluate
//! - `states` - Print the full basis-state distribution

pub mod closes_io;
pub mod config;
pub mod observability;
pub mod readout;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quantlaxmi_qregime::{FeatureVector, QuantumRegimeEngine, RegimeReport};
use std::path::{Path, PathBuf};
use tracing::info;

pub use config::{ColumnConfig, RunnerConfig};
pub use observability::{TracingGuards, init_tracing};

const SERVICE_NAME: &str = "quantlaxmi-qregime";

#[derive(Parser, Debug)]
#[command(name = "quantlaxmi-qregime")]
#[command(about = "QuantLaxmi Quantum Regime - statevector regime probabilities")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory for rotated log files
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Four raw statistics supplied on the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct RawFeatures {
    /// SPX momentum (rolling mean of log returns)
    #[arg(long, allow_hyphen_values = true)]
    pub trend: f64,

    /// NDX momentum minus SPX momentum
    #[arg(long, allow_hyphen_values = true)]
    pub leadership: f64,

    /// SPX rolling volatility
    #[arg(long, allow_hyphen_values = true)]
    pub stress: f64,

    /// Negated rolling mean of VIX log returns
    #[arg(long, allow_hyphen_values = true)]
    pub liquidity: f64,
}

impl From<RawFeatures> for FeatureVector {
    fn from(raw: RawFeatures) -> Self {
        FeatureVector::new(raw.trend, raw.leadership, raw.stress, raw.liquidity)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate raw statistics
    Eval {
        #[command(flatten)]
        features: RawFeatures,

        /// Emit JSON instead of the text read-out
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Derive statistics from a CSV of daily closes and evaluate the last row
    Run {
        /// CSV with SPX/NDX/VIX close columns, oldest first
        #[arg(long)]
        closes: PathBuf,

        /// Emit JSON instead of the text read-out
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print all basis-state probabilities
    States {
        #[command(flatten)]
        features: RawFeatures,
    },
}

/// Main entry point for the regime runner
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guards = init_tracing(SERVICE_NAME, &cli.log_dir);

    // Errors go back to main, which prints them once
    dispatch(&cli)
}

/// Execute a parsed command line.
pub fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let config = RunnerConfig::load_or_default(cli.config.as_deref())?;
    let engine = QuantumRegimeEngine::try_new(config.engine)
        .context("Engine configuration rejected")?;

    match &cli.command {
        Commands::Eval { features, json } => {
            let report = engine
                .evaluate(&FeatureVector::from(*features))
                .context("Regime evaluation failed")?;
            emit(&engine, report, None, *json)
        }
        Commands::Run { closes, json } => run_panel(&engine, &config, closes, *json),
        Commands::States { features } => {
            let probs = engine
                .state_probabilities(&FeatureVector::from(*features))
                .context("Regime evaluation failed")?;
            print!("{}", readout::render_states(&probs));
            Ok(())
        }
    }
}

fn run_panel(
    engine: &QuantumRegimeEngine,
    config: &RunnerConfig,
    closes: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let loaded = closes_io::load_panel(closes, &config.columns)?;
    let features = loaded
        .panel
        .features(&config.windows)
        .context("Feature derivation failed")?;
    info!(?features, "derived statistics");

    let report = engine
        .evaluate(&features)
        .context("Regime evaluation failed")?;
    emit(engine, report, loaded.as_of, json)
}

fn emit(
    engine: &QuantumRegimeEngine,
    report: RegimeReport,
    as_of: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    info!(
        bull = report.probabilities.bull,
        bear = report.probabilities.bear,
        shock = report.probabilities.shock,
        label = %report.label,
        "regime report"
    );

    if json {
        let envelope = readout::ReportEnvelope::new(report, engine.config(), as_of);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print!("{}", readout::render_text(&report, as_of.as_deref()));
    }
    Ok(())
}
