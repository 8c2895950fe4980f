// src/bounds.rs - Actuator rate/acceleration envelope for one swerve module
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::CommandSample;
use crate::range::{in_range, Interval};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("{name} bounds are inverted: [{lo}, {hi}]")]
    Inverted { name: &'static str, lo: f64, hi: f64 },
    #[error("{name} bounds must be finite")]
    NonFinite { name: &'static str },
    #[error("zero tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

/// Hardware limits of a module and its wheel.
///
/// Each field is a closed `[min, max]` interval. A validated set of bounds
/// (see [`ActuatorBounds::validate`]) always has `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorBounds {
    /// Module angular rate limits (rad/s)
    pub beta_dot: Interval,
    /// Module angular acceleration limits (rad/s²)
    pub beta_accel: Interval,
    /// Wheel angular acceleration limits (rad/s²)
    pub phi_accel: Interval,
}

impl ActuatorBounds {
    pub fn new(
        beta_dot: [f64; 2],
        beta_accel: [f64; 2],
        phi_accel: [f64; 2],
    ) -> Result<Self, BoundsError> {
        let bounds = Self {
            beta_dot: beta_dot.into(),
            beta_accel: beta_accel.into(),
            phi_accel: phi_accel.into(),
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), BoundsError> {
        check_interval("beta_dot", &self.beta_dot)?;
        check_interval("beta_accel", &self.beta_accel)?;
        check_interval("phi_accel", &self.phi_accel)
    }

    /// True when the raw sample already respects every limit, so no scaling is needed.
    pub fn admits(&self, sample: &CommandSample) -> bool {
        in_range(sample.dbeta, &self.beta_dot)
            && in_range(sample.d2beta, &self.beta_accel)
            && in_range(sample.dphi_dot, &self.phi_accel)
    }
}

fn check_interval(name: &'static str, interval: &Interval) -> Result<(), BoundsError> {
    if !interval.lo.is_finite() || !interval.hi.is_finite() {
        return Err(BoundsError::NonFinite { name });
    }
    if interval.lo > interval.hi {
        return Err(BoundsError::Inverted { name, lo: interval.lo, hi: interval.hi });
    }
    Ok(())
}
