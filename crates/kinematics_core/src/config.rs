use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Numeric parameters of a simulation run.
///
/// Field names follow the option names consumers pass around:
/// `{ "dt": .., "samples": .., "trajectoryLength": .. }`. Missing fields take
/// their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationSettings {
    /// Integration step.
    pub dt: f64,
    /// Ticks per visual frame.
    pub samples: usize,
    /// Capacity of every trajectory ring buffer.
    pub trajectory_length: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            dt: 0.01,
            samples: 10,
            trajectory_length: 256,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            bail!("dt must be positive and finite (got {}).", self.dt);
        }
        if self.samples == 0 {
            bail!("samples must be at least 1.");
        }
        if self.trajectory_length == 0 {
            bail!("trajectoryLength must be at least 1.");
        }
        Ok(())
    }

    /// Simulated time covered by one frame.
    pub fn frame_duration(&self) -> f64 {
        self.dt * self.samples as f64
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationSettings;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn defaults_are_valid() {
        let settings = SimulationSettings::default();
        settings.validate().expect("defaults should validate");
        assert!((settings.frame_duration() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn validate_rejects_invalid_values() {
        let base = SimulationSettings::default();
        assert_err_contains(
            SimulationSettings { dt: 0.0, ..base }.validate(),
            "dt must be positive",
        );
        assert_err_contains(
            SimulationSettings { dt: f64::NAN, ..base }.validate(),
            "dt must be positive",
        );
        assert_err_contains(SimulationSettings { samples: 0, ..base }.validate(), "samples");
        assert_err_contains(
            SimulationSettings { trajectory_length: 0, ..base }.validate(),
            "trajectoryLength",
        );
    }

    #[test]
    fn deserializes_camel_case_options_with_defaults() {
        let settings: SimulationSettings =
            serde_json::from_str(r#"{ "dt": 0.5, "trajectoryLength": 32 }"#).expect("valid json");
        assert_eq!(settings.dt, 0.5);
        assert_eq!(settings.trajectory_length, 32);
        assert_eq!(settings.samples, SimulationSettings::default().samples);
    }
}
