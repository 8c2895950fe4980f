//! Scaler configuration, embedded as the `[scaler]` table of the host config.
//!
//! ```toml
//! [scaler]
//! zero_tolerance = 0.01
//!
//! [scaler.bounds]
//! beta_dot = [-1.0, 1.0]
//! beta_accel = [-2.0, 2.0]
//! phi_accel = [-3.0, 3.0]
//! ```

use serde::{Deserialize, Serialize};

use crate::bounds::{ActuatorBounds, BoundsError};
use crate::time_scaler::DEFAULT_ZERO_TOLERANCE;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScalerConfig {
    pub bounds: ActuatorBounds,
    #[serde(default = "default_zero_tolerance")]
    pub zero_tolerance: f64,
}

impl ScalerConfig {
    pub fn validate(&self) -> Result<(), BoundsError> {
        self.bounds.validate()?;
        if !self.zero_tolerance.is_finite() || self.zero_tolerance < 0.0 {
            return Err(BoundsError::InvalidTolerance(self.zero_tolerance));
        }
        Ok(())
    }
}

fn default_zero_tolerance() -> f64 { DEFAULT_ZERO_TOLERANCE }
