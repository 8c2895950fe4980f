// src/replay.rs - Replay of recorded kinematic samples through the time scaler
//
// Input is JSON lines, one `CommandSample` per line. Each sample is scaled
// independently and written out as a `ReplayRecord`.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use swerve_shared::{
    compute_scaling_parameters, scale_motion, CommandSample, ScaledCommand, ScalingBounds,
    ScalingError, ScalingParameters, TimeScaler,
};
use thiserror::Error;

/// What to do with a sample whose scaling interval is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InfeasiblePolicy {
    /// Emit a zero command for the sample and continue.
    #[default]
    Halt,
    /// Stop the replay with an error.
    Abort,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed sample on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write record {index}: {source}")]
    Output {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Sample {index} cannot be scaled: {source}")]
    Infeasible {
        index: usize,
        #[source]
        source: ScalingError,
    },
}

/// One scaled sample as written to the output stream.
///
/// Every number in a record is finite, so the JSON output reads back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub index: usize,
    pub sample: CommandSample,
    /// `None` when a bound overflowed; such samples are always infeasible.
    pub bounds: Option<ScalingBounds>,
    pub parameters: ScalingParameters,
    pub command: ScaledCommand,
    pub feasible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub samples: usize,
    /// Samples already inside every limit.
    pub unscaled: usize,
    pub infeasible: usize,
}

/// Scale a single sample, applying `policy` if it cannot be scaled.
///
/// Empty intervals, non-finite samples and overflowing commands all count as
/// infeasible.
pub fn scale_sample(
    scaler: &TimeScaler,
    policy: InfeasiblePolicy,
    index: usize,
    sample: CommandSample,
) -> Result<ReplayRecord, ReplayError> {
    let bounds = scaler.compute_scaling_bounds(&sample);
    let scaled = if sample.is_finite() {
        compute_scaling_parameters(&bounds).and_then(|parameters| {
            let command = scale_motion(&sample, &parameters);
            if command.is_finite() {
                Ok((parameters, command))
            } else {
                Err(ScalingError::NonFiniteCommand(command))
            }
        })
    } else {
        Err(ScalingError::NonFiniteSample(sample))
    };
    let (parameters, command, feasible) = match scaled {
        Ok((parameters, command)) => (parameters, command, true),
        Err(source) => match policy {
            InfeasiblePolicy::Halt => {
                tracing::warn!(index, ?sample, "{}, halting", source);
                (ScalingParameters::HALT, ScaledCommand::default(), false)
            }
            InfeasiblePolicy::Abort => return Err(ReplayError::Infeasible { index, source }),
        },
    };
    Ok(ReplayRecord {
        index,
        sample,
        bounds: bounds.is_finite().then_some(bounds),
        parameters,
        command,
        feasible,
    })
}

/// Open the sample log, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, ReplayError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                tracing::error!("Failed to open samples file '{}': {}", path.display(), e);
                ReplayError::Io(e)
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create the record output, or use stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, ReplayError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                tracing::error!("Failed to create output file '{}': {}", path.display(), e);
                ReplayError::Io(e)
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Replay every sample from `input`, writing one JSON record per line to `output`.
pub fn replay<R: BufRead, W: Write>(
    scaler: &TimeScaler,
    policy: InfeasiblePolicy,
    input: R,
    mut output: W,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();
    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: CommandSample = serde_json::from_str(&line)
            .map_err(|source| ReplayError::Json { line: line_no + 1, source })?;
        let index = summary.samples;
        let record = scale_sample(scaler, policy, index, sample)?;

        summary.samples += 1;
        if record.bounds == Some(ScalingBounds::IDENTITY) {
            summary.unscaled += 1;
        }
        if !record.feasible {
            summary.infeasible += 1;
        }

        serde_json::to_writer(&mut output, &record)
            .map_err(|source| ReplayError::Output { index, source })?;
        output.write_all(b"\n")?;
    }
    output.flush()?;
    tracing::info!(
        samples = summary.samples,
        unscaled = summary.unscaled,
        infeasible = summary.infeasible,
        "replay finished"
    );
    Ok(summary)
}
