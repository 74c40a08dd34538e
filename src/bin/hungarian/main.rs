//! `hungarian`: solve an assignment problem from a matrix file.

mod output;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hungarian::{NegativePolicy, ShapePolicy, Solver, SolverConfig};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "hungarian")]
#[command(about = "Find a minimum-cost assignment of rows (workers) to columns (jobs)")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Matrix file: one row per line, or a JSON array of rows; `-` reads stdin")]
    input: PathBuf,
    #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
    format: OutputFormat,
    #[arg(long, value_name = "N", help = "Reject problems whose padded dimension exceeds N")]
    max_size: Option<usize>,
    #[arg(long, help = "Fail on non-square input instead of padding it")]
    reject_rectangular: bool,
    #[arg(long, help = "Shift negative costs to zero instead of rejecting them")]
    shift_negative: bool,
    #[arg(long, help = "Print every step of the algorithm")]
    steps: bool,
    #[arg(long, value_name = "PATH", help = "TOML file with solver settings")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    debug!(?config, "resolved solver configuration");

    let text = read_input(&cli.input)?;
    let costs = hungarian::parse::read_matrix(&text)
        .with_context(|| format!("failed to read matrix from {}", cli.input.display()))?;
    info!(rows = costs.nrows(), cols = costs.ncols(), "matrix loaded");

    let solution = Solver::new(config).solve(&costs)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => output::text::write(&mut out, &solution)?,
        OutputFormat::Json => output::json::write(&mut out, &costs, &solution)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SolverConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str::<SolverConfig>(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SolverConfig::default(),
    };

    if let Some(max_size) = cli.max_size {
        config.max_size = max_size;
    }
    if cli.reject_rectangular {
        config.shape = ShapePolicy::Reject;
    }
    if cli.shift_negative {
        config.negative = NegativePolicy::Shift;
    }
    if cli.steps {
        config.record_steps = true;
    }
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

/// 2 for input the solver refuses, 3 for the size limit, 1 for anything else.
fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<hungarian::Error>() {
            return if e.is_invalid_input() {
                ExitCode::from(2)
            } else {
                ExitCode::from(3)
            };
        }
        if cause.is::<toml::de::Error>() {
            return ExitCode::from(2);
        }
    }
    ExitCode::FAILURE
}
