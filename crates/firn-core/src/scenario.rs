//! Scenario records: the starting description of a glacier as supplied by
//! the host, validated before a simulation is built from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::GlacierState;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("ice thickness must be a positive finite number of metres, got {0}")]
    Thickness(f64),
    #[error("surface area must be a positive finite number of km², got {0}")]
    Area(f64),
    #[error("stability must be a percentage in 0–100, got {0}")]
    Stability(f64),
    #[error("temperature sensitivity must be in 1–10, got {0}")]
    Sensitivity(f64),
}

/// A named glacier and its starting condition.
///
/// Field names follow the scenario file format, so `iceThickness`,
/// `surfaceArea`, `stability` and `tempSensitivity` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlacierScenario {
    pub name: String,
    /// Starting ice thickness in metres.
    pub ice_thickness: f64,
    /// Starting surface area in km².
    pub surface_area: f64,
    /// Starting structural stability, percent.
    pub stability: f64,
    /// Melt response on a 1–10 scale; 5 is the neutral midpoint.
    pub temp_sensitivity: f64,
}

impl GlacierScenario {
    /// Parse a scenario from JSON and validate it in one step.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: GlacierScenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check every numeric field against its accepted range.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !self.ice_thickness.is_finite() || self.ice_thickness <= 0.0 {
            return Err(ScenarioError::Thickness(self.ice_thickness));
        }
        if !self.surface_area.is_finite() || self.surface_area <= 0.0 {
            return Err(ScenarioError::Area(self.surface_area));
        }
        if !self.stability.is_finite() || !(0.0..=100.0).contains(&self.stability) {
            return Err(ScenarioError::Stability(self.stability));
        }
        if !self.temp_sensitivity.is_finite() || !(1.0..=10.0).contains(&self.temp_sensitivity) {
            return Err(ScenarioError::Sensitivity(self.temp_sensitivity));
        }
        Ok(())
    }

    /// The immutable reference values a simulation keeps for its lifetime.
    pub fn baseline(&self) -> GlacierBaseline {
        GlacierBaseline {
            initial_thickness: self.ice_thickness,
            initial_area: self.surface_area,
            temp_sensitivity: self.temp_sensitivity,
        }
    }

    /// The glacier state at year zero of a run.
    pub fn initial_state(&self) -> GlacierState {
        GlacierState::clamped(self.ice_thickness, self.surface_area, self.stability)
    }
}

/// Starting values frozen at simulation start. The tick physics compare
/// the evolving state against these; they never change during a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlacierBaseline {
    /// Ice thickness at the start of the run, metres.
    pub initial_thickness: f64,
    /// Surface area at the start of the run, km².
    pub initial_area: f64,
    /// Melt response on a 1–10 scale.
    pub temp_sensitivity: f64,
}

impl GlacierBaseline {
    /// Starting ice volume in m·km².
    #[inline]
    pub fn initial_volume(&self) -> f64 {
        self.initial_thickness * self.initial_area
    }
}
