// src/command.rs - Per-tick command and scaling values exchanged with the kinematic model
use serde::{Deserialize, Serialize};

/// Raw kinematic output for one module-and-wheel pair, parameterized by `s`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandSample {
    /// dβ/ds, module steering command
    pub dbeta: f64,
    /// d²β/ds²
    pub d2beta: f64,
    /// dφ̇/ds, wheel angular-acceleration command
    pub dphi_dot: f64,
}

impl CommandSample {
    pub fn new(dbeta: f64, d2beta: f64, dphi_dot: f64) -> Self {
        Self { dbeta, d2beta, dphi_dot }
    }

    pub fn is_finite(&self) -> bool {
        self.dbeta.is_finite() && self.d2beta.is_finite() && self.dphi_dot.is_finite()
    }
}

/// Selected `ds/dt` and `d²s/dt²` for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    pub s_dot: f64,
    pub s_dot_dot: f64,
}

impl ScalingParameters {
    /// Zero path speed; scales any command to zero motion.
    pub const HALT: Self = Self { s_dot: 0.0, s_dot_dot: 0.0 };
}

/// True time derivatives ready for the actuator controllers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaledCommand {
    /// Module steering rate (rad/s)
    pub beta_dot: f64,
    /// Module steering acceleration (rad/s²)
    pub beta_accel: f64,
    /// Wheel angular acceleration (rad/s²)
    pub phi_accel: f64,
}

impl ScaledCommand {
    pub fn is_finite(&self) -> bool {
        self.beta_dot.is_finite() && self.beta_accel.is_finite() && self.phi_accel.is_finite()
    }
}
