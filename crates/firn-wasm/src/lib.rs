//! Browser bindings: a thin `WasmSimulation` wrapper around
//! `firn_core::simulation::Simulation`, plus the pure scoring functions
//! for result screens. All state lives on the Rust side; JavaScript
//! drives ticks and renders snapshots.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use firn_core::scenario::GlacierScenario;
use firn_core::scoring::{self, RunSummary};
use firn_core::simulation::{Outcome, Simulation, Step};

/// A glacier run owned by the WASM module.
///
/// The browser calls `poll()` from `setInterval` (or `tick()` for
/// manual stepping) and re-renders from `snapshot()` whenever a call
/// returns true.
#[wasm_bindgen]
pub struct WasmSimulation {
    inner: Simulation,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Build a simulation from a scenario JSON string
    /// (`{"name", "iceThickness", "surfaceArea", "stability", "tempSensitivity"}`).
    #[wasm_bindgen(constructor)]
    pub fn new(scenario_json: &str) -> Result<WasmSimulation, JsValue> {
        let scenario = GlacierScenario::from_json(scenario_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid scenario: {e}")))?;
        let inner = Simulation::new(scenario).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSimulation { inner })
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
    }

    pub fn running(&self) -> bool {
        self.inner.running()
    }

    pub fn terminal(&self) -> bool {
        self.inner.terminal()
    }

    /// `"collapsed"`, `"survived"`, or `undefined` while the run is live.
    pub fn outcome(&self) -> Option<String> {
        self.inner.outcome().map(|o| o.to_string())
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    pub fn years_survived(&self) -> u32 {
        self.inner.years_survived()
    }

    pub fn health(&self) -> f64 {
        self.inner.health()
    }

    /// Simulate one year immediately. Returns true if a year was
    /// simulated, false if the run is paused or already over.
    pub fn tick(&mut self) -> bool {
        self.inner.tick() != Step::Idle
    }

    /// Let the built-in clock decide whether a year is due, using the
    /// browser's `Date.now()`. Safe to call as often as the host likes.
    pub fn poll(&mut self) -> bool {
        self.inner.poll(js_sys::Date::now()) != Step::Idle
    }

    /// Set one environmental factor by its wire name (`"globalTemp"`,
    /// `"snowfall"`, `"emissions"`, `"oceanTemp"`). Returns the value
    /// actually stored after clamping.
    pub fn set_factor(&mut self, name: &str, value: f64) -> Result<f64, JsValue> {
        let factor = name
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(self.inner.set_factor(factor, value))
    }

    /// End the run as survived after this many simulated years.
    /// Pass `undefined` to remove the cap.
    pub fn set_year_cap(&mut self, years: Option<u32>) {
        self.inner.set_year_cap(years);
    }

    /// Change how often `poll()` fires a tick, in milliseconds.
    pub fn set_tick_period_ms(&mut self, period_ms: f64) {
        self.inner.set_tick_period_ms(period_ms);
    }

    /// Full view of the run as a plain JS object: year, running flag,
    /// outcome, health, ice stats, environment and trend history.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Scored final summary for the results screen, or `null` while the
    /// run is still live.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        let Some(outcome) = self.inner.outcome() else {
            return Ok(JsValue::NULL);
        };
        let scored = ScoredSummary::new(self.inner.summary(), outcome);
        serde_wasm_bindgen::to_value(&scored).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// `RunSummary` plus its outcome, score and grade in one flat object.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoredSummary {
    glacier_name: String,
    years_survived: u32,
    final_ice_volume: f64,
    final_stability: f64,
    final_thickness: f64,
    outcome: Outcome,
    score: u32,
    grade: String,
}

impl ScoredSummary {
    fn new(summary: RunSummary, outcome: Outcome) -> Self {
        let score = summary.score();
        let grade = summary.grade().to_string();
        Self {
            glacier_name: summary.glacier_name,
            years_survived: summary.years_survived,
            final_ice_volume: summary.final_ice_volume,
            final_stability: summary.final_stability,
            final_thickness: summary.final_thickness,
            outcome,
            score,
            grade,
        }
    }
}

/// Score a finished run from its final figures.
#[wasm_bindgen]
pub fn score(years_survived: u32, final_volume: f64, final_stability: f64, final_thickness: f64) -> u32 {
    scoring::score(years_survived, final_volume, final_stability, final_thickness)
}

/// Letter grade (`"S"` to `"D"`) for a score.
#[wasm_bindgen]
pub fn grade(score: u32) -> String {
    scoring::grade(score).to_string()
}
