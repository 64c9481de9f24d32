//! Player-controlled environmental forcing: four bounded factors that
//! stay fixed between ticks and only change when the host sets them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global temperature offset bounds (°C relative to present climate).
pub const GLOBAL_TEMP_RANGE: (f64, f64) = (-5.0, 5.0);
/// Snowfall multiplier bounds (1 = present-day snowfall).
pub const SNOWFALL_RANGE: (f64, f64) = (0.0, 2.0);
/// Emissions multiplier bounds (1 = present-day emissions).
pub const EMISSIONS_RANGE: (f64, f64) = (0.0, 2.0);
/// Ocean temperature offset bounds (°C).
pub const OCEAN_TEMP_RANGE: (f64, f64) = (-2.0, 2.0);

/// One of the four adjustable environmental factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvFactor {
    GlobalTemp,
    Snowfall,
    Emissions,
    OceanTemp,
}

impl EnvFactor {
    pub const ALL: [EnvFactor; 4] = [
        EnvFactor::GlobalTemp,
        EnvFactor::Snowfall,
        EnvFactor::Emissions,
        EnvFactor::OceanTemp,
    ];

    /// Inclusive (min, max) bounds for this factor.
    pub fn range(self) -> (f64, f64) {
        match self {
            EnvFactor::GlobalTemp => GLOBAL_TEMP_RANGE,
            EnvFactor::Snowfall => SNOWFALL_RANGE,
            EnvFactor::Emissions => EMISSIONS_RANGE,
            EnvFactor::OceanTemp => OCEAN_TEMP_RANGE,
        }
    }

    /// Factor key as it appears in scenario files and host messages.
    pub fn key(self) -> &'static str {
        match self {
            EnvFactor::GlobalTemp => "globalTemp",
            EnvFactor::Snowfall => "snowfall",
            EnvFactor::Emissions => "emissions",
            EnvFactor::OceanTemp => "oceanTemp",
        }
    }
}

impl fmt::Display for EnvFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown environmental factor '{0}' (expected one of globalTemp, snowfall, emissions, oceanTemp)")]
pub struct UnknownFactor(pub String);

impl FromStr for EnvFactor {
    type Err = UnknownFactor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvFactor::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownFactor(s.to_string()))
    }
}

/// The full environmental forcing applied on every tick.
///
/// Writes go through [`Environment::set`], which clamps into the factor's
/// bounds and ignores non-finite input, so a stored environment is always
/// in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Global temperature offset in °C.
    pub global_temp: f64,
    /// Snowfall multiplier.
    pub snowfall: f64,
    /// Emissions multiplier.
    pub emissions: f64,
    /// Ocean temperature offset in °C.
    pub ocean_temp: f64,
}

impl Default for Environment {
    /// The neutral baseline: no warming, present-day snowfall and
    /// emissions, neutral ocean.
    fn default() -> Self {
        Self {
            global_temp: 0.0,
            snowfall: 1.0,
            emissions: 1.0,
            ocean_temp: 0.0,
        }
    }
}

impl Environment {
    pub fn get(&self, factor: EnvFactor) -> f64 {
        match factor {
            EnvFactor::GlobalTemp => self.global_temp,
            EnvFactor::Snowfall => self.snowfall,
            EnvFactor::Emissions => self.emissions,
            EnvFactor::OceanTemp => self.ocean_temp,
        }
    }

    /// Set a factor, clamping the value into the factor's bounds.
    /// NaN and infinite values leave the factor unchanged. Returns the
    /// value actually stored.
    pub fn set(&mut self, factor: EnvFactor, value: f64) -> f64 {
        if !value.is_finite() {
            return self.get(factor);
        }
        let (lo, hi) = factor.range();
        let clamped = value.clamp(lo, hi);
        match factor {
            EnvFactor::GlobalTemp => self.global_temp = clamped,
            EnvFactor::Snowfall => self.snowfall = clamped,
            EnvFactor::Emissions => self.emissions = clamped,
            EnvFactor::OceanTemp => self.ocean_temp = clamped,
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_neutral() {
        let env = Environment::default();
        assert_eq!(env.global_temp, 0.0);
        assert_eq!(env.snowfall, 1.0);
        assert_eq!(env.emissions, 1.0);
        assert_eq!(env.ocean_temp, 0.0);
    }

    #[test]
    fn set_clamps_into_factor_bounds() {
        let mut env = Environment::default();
        assert_eq!(env.set(EnvFactor::GlobalTemp, 9.0), 5.0);
        assert_eq!(env.set(EnvFactor::GlobalTemp, -9.0), -5.0);
        assert_eq!(env.set(EnvFactor::Snowfall, 3.5), 2.0);
        assert_eq!(env.set(EnvFactor::OceanTemp, -4.0), -2.0);
        assert_eq!(env.global_temp, -5.0);
        assert_eq!(env.snowfall, 2.0);
    }

    #[test]
    fn set_in_range_stores_exact_value() {
        let mut env = Environment::default();
        assert_eq!(env.set(EnvFactor::Emissions, 1.3), 1.3);
        assert_eq!(env.emissions, 1.3);
    }

    #[test]
    fn set_ignores_non_finite_input() {
        let mut env = Environment::default();
        env.set(EnvFactor::GlobalTemp, 2.5);
        assert_eq!(env.set(EnvFactor::GlobalTemp, f64::NAN), 2.5);
        assert_eq!(env.set(EnvFactor::GlobalTemp, f64::INFINITY), 2.5);
        assert_eq!(env.global_temp, 2.5);
    }

    #[test]
    fn factor_keys_round_trip_through_from_str() {
        for factor in EnvFactor::ALL {
            assert_eq!(factor.key().parse::<EnvFactor>(), Ok(factor));
        }
        assert!("albedo".parse::<EnvFactor>().is_err());
    }

    #[test]
    fn factor_serde_uses_wire_keys() {
        let json = serde_json::to_string(&EnvFactor::GlobalTemp).unwrap();
        assert_eq!(json, "\"globalTemp\"");
        let parsed: EnvFactor = serde_json::from_str("\"oceanTemp\"").unwrap();
        assert_eq!(parsed, EnvFactor::OceanTemp);
    }

    #[test]
    fn environment_serialises_camel_case() {
        let json = serde_json::to_value(Environment::default()).unwrap();
        assert!(json.get("globalTemp").is_some());
        assert!(json.get("oceanTemp").is_some());
    }
}
