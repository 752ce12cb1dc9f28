use std::f64::consts::{FRAC_PI_2, TAU};

/// Spinner wheel tuning
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SpinnerConfig {
    /// Lower bound of the launch velocity (rad/s)
    pub velocity_min: f64,
    /// Upper bound (exclusive) of the launch velocity (rad/s)
    pub velocity_max: f64,
    /// Multiplier applied to the velocity once per tick
    pub decay: f64,
    /// Velocity below which the wheel stops
    pub stop_threshold: f64,
    /// Angle of the pointer the segments are matched against (radians)
    pub pointer_angle: f64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            velocity_min: 30.0,
            velocity_max: 32.0,
            decay: 0.95,
            stop_threshold: 0.01,
            pointer_angle: FRAC_PI_2, // straight up
        }
    }
}

impl SpinnerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.velocity_min.is_finite() || self.velocity_min <= 0.0 {
            return Err("velocity_min must be finite and > 0".to_string());
        }
        if !self.velocity_max.is_finite() || self.velocity_max < self.velocity_min {
            return Err("velocity_max must be finite and >= velocity_min".to_string());
        }
        if !self.decay.is_finite() || self.decay <= 0.0 || self.decay >= 1.0 {
            return Err("decay must be in (0, 1)".to_string());
        }
        if !self.stop_threshold.is_finite() || self.stop_threshold <= 0.0 {
            return Err("stop_threshold must be finite and > 0".to_string());
        }
        if self.stop_threshold >= self.velocity_min {
            return Err("stop_threshold must be below velocity_min".to_string());
        }
        if !self.pointer_angle.is_finite() || !(0.0..TAU).contains(&self.pointer_angle) {
            return Err("pointer_angle must be in [0, 2π)".to_string());
        }
        Ok(())
    }
}
