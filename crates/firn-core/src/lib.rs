//! Core simulation engine for the firn glacier survival game: a
//! deterministic yearly tick over a small physical state, a stateful run
//! controller, and pure scoring of finished runs. No I/O, no clocks of
//! its own, no randomness.

pub mod clock;
pub mod engine;
pub mod environment;
pub mod history;
pub mod scenario;
pub mod scoring;
pub mod simulation;
pub mod state;
