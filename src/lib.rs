// swerve-rs: host-side tooling around the swerve module time scaler

pub mod config;
pub mod replay;

pub use config::{load_config, Config, ConfigError, ReplayConfig};
pub use replay::{open_input, open_output, replay, scale_sample, InfeasiblePolicy, ReplayError, ReplayRecord, ReplaySummary};
pub use swerve_shared::{
    compute_scaling_parameters, in_range, scale_motion, ActuatorBounds, CommandSample, Interval,
    ScaledCommand, ScalingBounds, ScalingError, ScalingParameters, TimeScaler,
};
