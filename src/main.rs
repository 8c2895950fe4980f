// src/main.rs - Replay recorded module commands through the time scaler
use std::io;
use std::path::PathBuf;

use clap::Parser;
use swerve_rs::{config, replay, InfeasiblePolicy, TimeScaler};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "scaler-host", version, about = "Scale swerve module commands to actuator limits")]
struct Args {
    /// Scaler configuration file
    #[arg(short, long, default_value = "scaler.toml")]
    config: PathBuf,

    /// JSON-lines file of command samples (stdin when omitted)
    samples: Option<PathBuf>,

    /// Output file for scaled records (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the configured policy for infeasible samples
    #[arg(long, value_enum)]
    on_infeasible: Option<InfeasiblePolicy>,

    /// Log computed bounds for every sample
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    // Logs go to stderr so stdout can carry the records
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(io::stderr)
        .init();

    let config_path = args.config.to_string_lossy();
    tracing::info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).map_err(|e| {
        tracing::error!("Failed to load config from '{}': {}", config_path, e);
        Box::new(e) as BoxError
    })?;

    let bounds = &config.scaler.bounds;
    tracing::info!("Module rate limits: [{}, {}] rad/s", bounds.beta_dot.lo, bounds.beta_dot.hi);
    tracing::info!("Module accel limits: [{}, {}] rad/s²", bounds.beta_accel.lo, bounds.beta_accel.hi);
    tracing::info!("Wheel accel limits: [{}, {}] rad/s²", bounds.phi_accel.lo, bounds.phi_accel.hi);

    let scaler = TimeScaler::from_config(&config.scaler).map_err(|e| {
        tracing::error!("Invalid scaler settings: {}", e);
        Box::new(e) as BoxError
    })?;
    let policy = args.on_infeasible.unwrap_or(config.replay.on_infeasible);

    let input = replay::open_input(args.samples.as_deref())?;
    let output = replay::open_output(args.output.as_deref())?;

    let summary = replay::replay(&scaler, policy, input, output).map_err(|e| {
        tracing::error!("Replay failed: {}", e);
        Box::new(e) as BoxError
    })?;
    if summary.infeasible > 0 {
        tracing::warn!("{} of {} samples were infeasible and halted", summary.infeasible, summary.samples);
    }
    Ok(())
}
