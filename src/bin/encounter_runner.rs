//! Headless Encounter Runner
//!
//! Runs a batch of simulated encounters and writes one row per encounter.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use encounter_calibration::core::config::BatchConfig;
use encounter_calibration::core::error::Result;
use encounter_calibration::core::types::Difficulty;
use encounter_calibration::simulation::{run_batch, write_csv};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

/// Headless Encounter Runner - simulate encounters of a given difficulty
#[derive(Parser, Debug)]
#[command(name = "encounter_runner")]
#[command(about = "Simulate many encounters and write per-encounter results")]
struct Args {
    /// TOML batch configuration
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Requested difficulty: easy, medium, hard, or deadly
    #[arg(long, short = 'd')]
    difficulty: Option<Difficulty>,

    /// Number of encounters to simulate
    #[arg(long, short = 'n')]
    simulations: Option<usize>,

    /// Number of party members
    #[arg(long)]
    party_size: Option<u32>,

    /// Number of enemies
    #[arg(long)]
    enemies: Option<u32>,

    /// Base random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write rows here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encounter_calibration=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        config.difficulty = Some(difficulty);
    }
    if let Some(simulations) = args.simulations {
        config.simulations = simulations;
    }
    if let Some(size) = args.party_size {
        config.party.size = size;
    }
    if let Some(count) = args.enemies {
        config.enemies.count = Some(count);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let report = run_batch(&config)?;
    eprintln!("{}", report.summary());

    let writer: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Csv => write_csv(&report.rows, writer)?,
        OutputFormat::Json => {
            let mut writer = writer;
            writeln!(writer, "{}", report.to_json())?;
            writer.flush()?;
        }
    }

    Ok(())
}
