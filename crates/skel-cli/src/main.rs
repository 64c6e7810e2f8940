mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::{render, OutputMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Post-process TEASAR-derived neurite skeletons: remove dust, break
/// loops, bridge nearby pieces, and prune short ticks.
#[derive(Debug, Parser)]
#[command(name = "skel", version, about)]
struct Cli {
    /// Emit machine-readable JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full trim pipeline over a skeleton JSON file.
    Trim {
        /// Path to the input skeleton JSON.
        input: PathBuf,
        /// Path to write the trimmed skeleton JSON to.
        output: PathBuf,
        /// Path to a trim.toml config file (defaults to ./trim.toml, then the
        /// per-user config directory, if present).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the dust-removal cable-length threshold, in nanometers.
        #[arg(long)]
        dust_threshold: Option<f64>,
        /// Override the tick-removal cable-length threshold, in nanometers.
        #[arg(long)]
        tick_threshold: Option<f64>,
    },
    /// Print structural statistics for a skeleton JSON file.
    Stats {
        /// Path to the skeleton JSON to inspect.
        input: PathBuf,
    },
    /// Report critical points and cycles without modifying the skeleton.
    Diagnose {
        /// Path to the skeleton JSON to inspect.
        input: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mode = OutputMode::from_json_flag(cli.json);

    match cli.command {
        Command::Trim {
            input,
            output,
            config,
            dust_threshold,
            tick_threshold,
        } => {
            let report = cmd::trim::run(&cmd::trim::Args {
                input,
                output,
                config,
                dust_threshold,
                tick_threshold,
            })?;
            render(mode, &report)?;
        }
        Command::Stats { input } => {
            let report = cmd::stats::run(&cmd::stats::Args { input })?;
            render(mode, &report)?;
        }
        Command::Diagnose { input } => {
            let report = cmd::diagnose::run(&cmd::diagnose::Args { input })?;
            render(mode, &report)?;
        }
    }

    Ok(())
}
