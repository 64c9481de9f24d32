//! The stateful controller for a single run: owns the glacier state, the
//! environment, the trend history and the tick schedule, and decides when
//! a run is over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::TickClock;
use crate::engine;
use crate::environment::{EnvFactor, Environment};
use crate::history::{History, HistoryPoint};
use crate::scenario::{GlacierBaseline, GlacierScenario, ScenarioError};
use crate::scoring::RunSummary;
use crate::state::GlacierState;

/// Simulated calendar year at which every run begins.
pub const EPOCH_YEAR: i32 = 2024;

/// Health shown before the first tick.
const INITIAL_HEALTH: f64 = 100.0;
/// Weight of stability in the health blend.
const STABILITY_HEALTH_WEIGHT: f64 = 0.4;
/// Weight of the remaining-mass ratio in the health blend.
const MASS_HEALTH_WEIGHT: f64 = 0.6;

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The glacier melted away or its structure failed.
    Collapsed,
    /// The run reached its configured year cap with the glacier intact.
    Survived,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Collapsed => "collapsed",
            Outcome::Survived => "survived",
        })
    }
}

/// What a call to [`Simulation::tick`] or [`Simulation::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing happened: paused, already finished, or no tick due yet.
    Idle,
    /// One year was simulated and the run continues.
    Advanced,
    /// One year was simulated and it ended the run.
    Finished(Outcome),
}

/// A paused-or-running glacier simulation.
///
/// The controller never schedules itself: hosts either call [`tick`]
/// directly on their own cadence or call [`poll`] with a millisecond
/// clock and let the built-in [`TickClock`] decide when a year is due.
///
/// [`tick`]: Simulation::tick
/// [`poll`]: Simulation::poll
#[derive(Debug, Clone)]
pub struct Simulation {
    name: String,
    baseline: GlacierBaseline,
    state: GlacierState,
    env: Environment,
    year: i32,
    running: bool,
    outcome: Option<Outcome>,
    health: f64,
    history: History,
    clock: TickClock,
    year_cap: Option<u32>,
}

impl Simulation {
    /// Build a simulation from a validated scenario. The history starts
    /// with a single point at the epoch year.
    pub fn new(scenario: GlacierScenario) -> Result<Self, ScenarioError> {
        scenario.validate()?;
        let baseline = scenario.baseline();
        let state = scenario.initial_state();
        let mut history = History::new();
        history.push(HistoryPoint {
            year: EPOCH_YEAR,
            thickness: state.thickness,
            temp: 0.0,
        });
        Ok(Self {
            name: scenario.name,
            baseline,
            state,
            env: Environment::default(),
            year: EPOCH_YEAR,
            running: false,
            outcome: None,
            health: INITIAL_HEALTH,
            history,
            clock: TickClock::default(),
            year_cap: None,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn baseline(&self) -> &GlacierBaseline {
        &self.baseline
    }

    pub fn state(&self) -> &GlacierState {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whole years simulated since the epoch.
    pub fn years_survived(&self) -> u32 {
        (self.year - EPOCH_YEAR).max(0) as u32
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True once the run has ended, whichever way.
    pub fn terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Blended condition indicator in 0–100.
    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn year_cap(&self) -> Option<u32> {
        self.year_cap
    }

    // ── Control surface ──────────────────────────────────────────────────

    /// Allow ticks. Does nothing once the run is terminal.
    pub fn start(&mut self) {
        if self.outcome.is_none() {
            self.running = true;
        }
    }

    /// Stop future ticks and forget any pending tick deadline, so a
    /// later [`start`](Simulation::start) waits a full period again
    /// rather than replaying missed time.
    pub fn pause(&mut self) {
        self.running = false;
        self.clock.cancel();
    }

    /// Update one environmental factor; the new value applies from the
    /// next tick. Returns the value actually stored after clamping.
    pub fn set_factor(&mut self, factor: EnvFactor, value: f64) -> f64 {
        self.env.set(factor, value)
    }

    /// End the run with [`Outcome::Survived`] once this many years have
    /// been simulated. `None` (the default) lets the run go on until
    /// the glacier fails or the host stops it.
    pub fn set_year_cap(&mut self, cap: Option<u32>) {
        self.year_cap = cap;
    }

    /// Change the poll cadence. Takes effect from the next deadline.
    pub fn set_tick_period_ms(&mut self, period_ms: f64) {
        self.clock.set_period_ms(period_ms);
    }

    // ── Advancing ────────────────────────────────────────────────────────

    /// Simulate one year now, regardless of the clock. Paused and
    /// finished simulations report [`Step::Idle`] and stay untouched.
    pub fn tick(&mut self) -> Step {
        if !self.running || self.outcome.is_some() {
            return Step::Idle;
        }

        let transition = engine::advance(&self.state, &self.env, &self.baseline);
        self.state = transition.state;
        self.year += 1;

        let mass_ratio = self.state.volume() / self.baseline.initial_volume();
        self.health = (self.state.stability * STABILITY_HEALTH_WEIGHT
            + mass_ratio * 100.0 * MASS_HEALTH_WEIGHT)
            .clamp(0.0, 100.0);

        // The terminal year is still recorded.
        self.history.push(HistoryPoint {
            year: self.year,
            thickness: self.state.thickness,
            temp: transition.effective_temp,
        });

        if self.state.melted() || self.state.collapsed() {
            return self.finish(Outcome::Collapsed);
        }
        if self.year_cap.is_some_and(|cap| self.years_survived() >= cap) {
            return self.finish(Outcome::Survived);
        }
        Step::Advanced
    }

    /// Drive the simulation from a host clock. `now_ms` is any steady
    /// millisecond reading (browser `Date.now()`, native `Instant`
    /// deltas). Ticks at most once per call.
    pub fn poll(&mut self, now_ms: f64) -> Step {
        if !self.running || self.outcome.is_some() {
            return Step::Idle;
        }
        if !self.clock.armed() {
            self.clock.arm(now_ms);
            return Step::Idle;
        }
        if self.clock.poll(now_ms) {
            self.tick()
        } else {
            Step::Idle
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.outcome = Some(outcome);
        self.running = false;
        self.clock.cancel();
        Step::Finished(outcome)
    }

    // ── Reporting ────────────────────────────────────────────────────────

    /// Full serialisable view of the current run for presentation layers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.name.clone(),
            year: self.year,
            running: self.running,
            outcome: self.outcome,
            health: self.health,
            ice: IceStats {
                thickness: self.state.thickness,
                area: self.state.area,
                stability: self.state.stability,
                volume: self.state.volume(),
            },
            environment: self.env,
            history: self.history.iter().copied().collect(),
        }
    }

    /// The values scoring and persistence care about. Usually read once
    /// the run is terminal, but defined at any point of a run.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            glacier_name: self.name.clone(),
            years_survived: self.years_survived(),
            final_ice_volume: self.state.volume(),
            final_stability: self.state.stability,
            final_thickness: self.state.thickness,
        }
    }
}

/// Serialisable view of a run at one instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub year: i32,
    pub running: bool,
    pub outcome: Option<Outcome>,
    pub health: f64,
    pub ice: IceStats,
    pub environment: Environment,
    pub history: Vec<HistoryPoint>,
}

/// Ice figures inside a [`Snapshot`], volume included so presentation
/// layers don't recompute it.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceStats {
    pub thickness: f64,
    pub area: f64,
    pub stability: f64,
    pub volume: f64,
}
