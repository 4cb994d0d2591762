//! Colocation job runner.
//!
//! Reads a YAML or JSON job file describing a destination grid and
//! ungridded observations, colocates the observations onto the grid and
//! writes the filled output grid as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use colocation::config::parse_fill_value;
use colocation::{ConstraintKind, KernelKind};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colocator::{load_job, resolve_config, run_job, ColocationOverrides};

#[derive(Parser, Debug)]
#[command(name = "colocator")]
#[command(about = "Colocate ungridded observations onto a regular grid")]
struct Args {
    /// Job file path (.yaml, .yml or .json)
    job: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cell constraint: interval or binning
    #[arg(long)]
    constraint: Option<String>,

    /// Value written to cells that receive no points (accepts inf/-inf)
    #[arg(long, allow_hyphen_values = true)]
    fill_value: Option<String>,

    /// Aggregation kernel
    #[arg(long)]
    kernel: Option<String>,

    /// Compute cells in parallel
    #[arg(long)]
    parallel: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, env = "COLOCATION_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn overrides(&self) -> Result<ColocationOverrides> {
        let constraint = match &self.constraint {
            Some(s) => Some(
                ConstraintKind::parse(s).with_context(|| format!("Unknown constraint: {}", s))?,
            ),
            None => None,
        };
        let fill_value = match &self.fill_value {
            Some(s) => {
                Some(parse_fill_value(s).with_context(|| format!("Invalid fill value: {}", s))?)
            }
            None => None,
        };
        let kernel = match &self.kernel {
            Some(s) => Some(KernelKind::parse(s).with_context(|| format!("Unknown kernel: {}", s))?),
            None => None,
        };

        Ok(ColocationOverrides {
            constraint,
            fill_value,
            kernel,
            parallel: self.parallel.then_some(true),
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let job = load_job(&args.job)?;
    info!(path = %args.job.display(), "Loaded job file");

    let config = resolve_config(&job, &args.overrides()?);
    let report = run_job(&job, &config)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "Wrote colocated grid");
        }
        None => println!("{}", json),
    }

    Ok(())
}
