// src/time_scaler.rs - Time scaling of s-parameterized swerve module commands
//
// The kinematic model produces commands as derivatives with respect to the
// path parameter `s`. Choosing `ds/dt` and `d²s/dt²` turns them into time
// derivatives; this module finds the range of those two values that keeps
// every actuator inside its envelope, picks the least restrictive one and
// applies it with the chain rule.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounds::{ActuatorBounds, BoundsError};
use crate::command::{CommandSample, ScaledCommand, ScalingParameters};
use crate::config::ScalerConfig;
use crate::range::Interval;

/// Commands whose magnitude is at most this far from zero do not constrain `ds/dt`.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalingError {
    #[error("no feasible ds/dt: interval [{lower}, {upper}] is empty")]
    InfeasibleRate { lower: f64, upper: f64 },
    #[error("no feasible d2s/dt2: interval [{lower}, {upper}] is empty")]
    InfeasibleAccel { lower: f64, upper: f64 },
    #[error("command sample is not finite: {0:?}")]
    NonFiniteSample(CommandSample),
    #[error("scaled command is not finite: {0:?}")]
    NonFiniteCommand(ScaledCommand),
}

/// Admissible `ds/dt` interval and, for `ds/dt = ds_upper`, admissible `d²s/dt²` interval.
///
/// Constraints from different actuators can conflict, leaving a crossed
/// interval. Bound computation returns it unchanged; use
/// [`ScalingBounds::check`] or [`ScalingBounds::is_feasible`] before selecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingBounds {
    pub ds_lower: f64,
    pub ds_upper: f64,
    pub d2s_lower: f64,
    pub d2s_upper: f64,
}

impl ScalingBounds {
    /// No scaling: `ds/dt` and `d²s/dt²` both range over `[0, 1]`.
    pub const IDENTITY: Self = Self {
        ds_lower: 0.0,
        ds_upper: 1.0,
        d2s_lower: 0.0,
        d2s_upper: 1.0,
    };

    pub fn rate(&self) -> Interval {
        Interval::new(self.ds_lower, self.ds_upper)
    }

    pub fn accel(&self) -> Interval {
        Interval::new(self.d2s_lower, self.d2s_upper)
    }

    pub fn is_finite(&self) -> bool {
        self.ds_lower.is_finite()
            && self.ds_upper.is_finite()
            && self.d2s_lower.is_finite()
            && self.d2s_upper.is_finite()
    }

    pub fn is_feasible(&self) -> bool {
        self.check().is_ok()
    }

    pub fn check(&self) -> Result<(), ScalingError> {
        if self.rate().is_empty() {
            return Err(ScalingError::InfeasibleRate { lower: self.ds_lower, upper: self.ds_upper });
        }
        if self.accel().is_empty() {
            return Err(ScalingError::InfeasibleAccel { lower: self.d2s_lower, upper: self.d2s_upper });
        }
        Ok(())
    }

    fn tighten_rate(&mut self, lower: f64, upper: f64) {
        self.ds_lower = self.ds_lower.max(lower);
        self.ds_upper = self.ds_upper.min(upper);
    }

    fn tighten_accel(&mut self, lower: f64, upper: f64) {
        self.d2s_lower = self.d2s_lower.max(lower);
        self.d2s_upper = self.d2s_upper.min(upper);
    }
}

/// Scaling bound calculator for a single module and its wheel.
///
/// Holds only the fixed actuator limits, so one instance can serve any number
/// of control loops concurrently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScaler {
    bounds: ActuatorBounds,
    zero_tolerance: f64,
}

impl TimeScaler {
    pub fn new(bounds: ActuatorBounds) -> Result<Self, BoundsError> {
        bounds.validate()?;
        Ok(Self {
            bounds,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        })
    }

    pub fn from_config(config: &ScalerConfig) -> Result<Self, BoundsError> {
        Self::new(config.bounds)?.with_zero_tolerance(config.zero_tolerance)
    }

    /// Override the absolute tolerance below which a command is treated as zero.
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Result<Self, BoundsError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(BoundsError::InvalidTolerance(tolerance));
        }
        self.zero_tolerance = tolerance;
        Ok(self)
    }

    pub fn bounds(&self) -> &ActuatorBounds {
        &self.bounds
    }

    /// Compute the admissible `ds/dt` and `d²s/dt²` intervals for one sample.
    ///
    /// The result may be crossed when constraints conflict; it is not repaired.
    /// Samples must be finite: a NaN command is dropped by the `max`/`min`
    /// tightening and yields bounds that ignore it. [`TimeScaler::tick`]
    /// rejects such samples.
    pub fn compute_scaling_bounds(&self, sample: &CommandSample) -> ScalingBounds {
        if self.bounds.admits(sample) {
            tracing::trace!(?sample, "command within actuator limits, no scaling required");
            return ScalingBounds::IDENTITY;
        }

        let CommandSample { dbeta, d2beta, dphi_dot } = *sample;
        let ignore_beta = self.is_near_zero(dbeta);
        let ignore_phi = self.is_near_zero(dphi_dot);
        let beta_accel = &self.bounds.beta_accel;
        let phi_accel = &self.bounds.phi_accel;

        let mut scaling = ScalingBounds::IDENTITY;

        // Module rate term is limited by the module acceleration bound (eq. 36a).
        if !ignore_beta {
            scaling.tighten_rate(
                beta_accel.lower_at_sign_of(dbeta) / dbeta,
                beta_accel.upper_at_sign_of(dbeta) / dbeta,
            );
        }
        // eq. 36c
        if !ignore_phi {
            scaling.tighten_rate(
                phi_accel.lower_at_sign_of(dphi_dot) / dphi_dot,
                phi_accel.upper_at_sign_of(dphi_dot) / dphi_dot,
            );
        }

        // Second derivative bound depends on s_dot, taken at its maximum.
        if !ignore_beta {
            let s_dot = scaling.ds_upper;
            let curvature = d2beta * s_dot.powi(2);
            scaling.tighten_accel(
                (beta_accel.lower_at_sign_of(dbeta) - curvature) / dbeta,
                (beta_accel.upper_at_sign_of(dbeta) - curvature) / dbeta,
            );
        }

        tracing::debug!(
            ignore_beta,
            ignore_phi,
            ds_lower = scaling.ds_lower,
            ds_upper = scaling.ds_upper,
            d2s_lower = scaling.d2s_lower,
            d2s_upper = scaling.d2s_upper,
            "computed scaling bounds"
        );
        scaling
    }

    /// Bounds, selection and scaling for one sample, in that order.
    ///
    /// Fails for non-finite samples, empty intervals, and scaled commands
    /// that overflow.
    pub fn tick(&self, sample: &CommandSample) -> Result<ScaledCommand, ScalingError> {
        if !sample.is_finite() {
            return Err(ScalingError::NonFiniteSample(*sample));
        }
        let scaling = self.compute_scaling_bounds(sample);
        let parameters = compute_scaling_parameters(&scaling)?;
        let scaled = scale_motion(sample, &parameters);
        if !scaled.is_finite() {
            return Err(ScalingError::NonFiniteCommand(scaled));
        }
        Ok(scaled)
    }

    fn is_near_zero(&self, value: f64) -> bool {
        value.abs() <= self.zero_tolerance
    }
}

/// Select the least restrictive scaling: the upper end of both intervals.
pub fn compute_scaling_parameters(scaling: &ScalingBounds) -> Result<ScalingParameters, ScalingError> {
    scaling.check()?;
    Ok(ScalingParameters {
        s_dot: scaling.ds_upper,
        s_dot_dot: scaling.d2s_upper,
    })
}

/// Convert `s` derivatives into time derivatives with the chain rule.
///
/// `d²β/dt² = (d²β/ds²)(ds/dt)² + (dβ/ds)(d²s/dt²)`. The wheel term only has
/// a first-order part.
pub fn scale_motion(sample: &CommandSample, parameters: &ScalingParameters) -> ScaledCommand {
    let s_dot = parameters.s_dot;
    ScaledCommand {
        beta_dot: sample.dbeta * s_dot,
        beta_accel: sample.d2beta * s_dot.powi(2) + sample.dbeta * parameters.s_dot_dot,
        phi_accel: sample.dphi_dot * s_dot,
    }
}
