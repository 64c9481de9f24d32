//! Final scoring: reduce a finished run to a numeric score and a letter
//! grade. Everything here is pure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Points per simulated year survived.
const YEARS_WEIGHT: f64 = 10.0;
/// Divisor applied to the final ice volume (m·km²).
const VOLUME_DIVISOR: f64 = 100.0;
/// Points per percent of final stability.
const STABILITY_WEIGHT: f64 = 5.0;
/// Divisor applied to the final thickness (m).
const THICKNESS_DIVISOR: f64 = 10.0;

/// Score a finished run. Floored to a whole number and never negative.
pub fn score(
    years_survived: u32,
    final_volume: f64,
    final_stability: f64,
    final_thickness: f64,
) -> u32 {
    let raw = years_survived as f64 * YEARS_WEIGHT
        + final_volume / VOLUME_DIVISOR
        + final_stability * STABILITY_WEIGHT
        + final_thickness / THICKNESS_DIVISOR;
    raw.floor().max(0.0) as u32
}

/// Letter grade bands. Each band is inclusive on its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        })
    }
}

/// Map a score to its grade band.
pub fn grade(score: u32) -> Grade {
    match score {
        s if s >= 500 => Grade::S,
        s if s >= 300 => Grade::A,
        s if s >= 200 => Grade::B,
        s if s >= 100 => Grade::C,
        _ => Grade::D,
    }
}

/// The values a finished run hands to scoring and persistence.
///
/// Serialises with the leaderboard wire names (`glacierName`,
/// `yearsSurvived`, `finalIceVolume`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub glacier_name: String,
    pub years_survived: u32,
    /// Final ice volume in m·km².
    pub final_ice_volume: f64,
    /// Final stability, percent.
    pub final_stability: f64,
    /// Final ice thickness, metres.
    pub final_thickness: f64,
}

impl RunSummary {
    pub fn score(&self) -> u32 {
        score(
            self.years_survived,
            self.final_ice_volume,
            self.final_stability,
            self.final_thickness,
        )
    }

    pub fn grade(&self) -> Grade {
        grade(self.score())
    }
}
