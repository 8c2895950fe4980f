// swerve_shared: actuator bounds and time scaling for swerve module commands

pub mod bounds;
pub mod command;
pub mod config;
pub mod range;
pub mod time_scaler;

pub use bounds::{ActuatorBounds, BoundsError};
pub use command::{CommandSample, ScaledCommand, ScalingParameters};
pub use config::ScalerConfig;
pub use range::{in_range, Interval};
pub use time_scaler::{
    compute_scaling_parameters, scale_motion, ScalingBounds, ScalingError, TimeScaler,
    DEFAULT_ZERO_TOLERANCE,
};
