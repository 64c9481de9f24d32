//! Tick physics: one simulated year of melt, snowfall accumulation and
//! structural change, as a pure function of state, environment and
//! baseline.

use crate::environment::Environment;
use crate::scenario::GlacierBaseline;
use crate::state::GlacierState;

/// Warming in °C contributed per unit of emissions multiplier above 1.
const EMISSION_WARMING_PER_UNIT: f64 = 0.1;
/// Sensitivity midpoint: a glacier with sensitivity 5 responds 1:1.
const SENSITIVITY_MIDPOINT: f64 = 5.0;
/// Weight of ocean temperature relative to air temperature in melt.
const OCEAN_MELT_WEIGHT: f64 = 0.8;
/// Melt offset in °C-equivalent; keeps some ablation even at neutral
/// temperatures.
const BASELINE_MELT_OFFSET: f64 = 2.0;
/// Accumulation in metres per year at snowfall multiplier 1 with no
/// warming.
const BASE_ACCUMULATION: f64 = 5.0;
/// Accumulation lost per °C of effective warming (warm air turns snow
/// to rain).
const WARM_SNOW_LOSS_PER_DEGREE: f64 = 0.1;
/// Floor on the snow retention factor.
const MIN_SNOW_RETENTION: f64 = 0.1;
/// Area starts shrinking once thickness drops below this fraction of
/// its initial value.
const THIN_THRESHOLD_FRACTION: f64 = 0.5;
/// Yearly area retention while the glacier is thin (1% loss per year).
const THIN_AREA_RETENTION: f64 = 0.99;
/// Ocean offset in °C above which the glacier takes structural stress.
const OCEAN_STRESS_THRESHOLD: f64 = 1.0;
/// Stability lost per year when melt outpaces accumulation.
const MELT_STRESS_PENALTY: f64 = 2.0;
/// Stability lost per year of ocean stress.
const OCEAN_STRESS_PENALTY: f64 = 1.0;
/// Stability gained per year when accumulation outpaces melt.
const GROWTH_RECOVERY_BONUS: f64 = 1.0;

/// Everything one tick produces: the next state plus the intermediate
/// rates, so hosts can report them without recomputing.
#[derive(Debug, Clone, Copy)]
pub struct TickTransition {
    pub state: GlacierState,
    /// Air temperature offset after the emissions contribution, °C.
    pub effective_temp: f64,
    /// Ice lost this year, metres.
    pub melt_rate: f64,
    /// Ice gained this year, metres.
    pub accumulation: f64,
}

/// Advance a glacier by one simulated year.
///
/// Pure and total: the same inputs always produce the same transition,
/// and no input makes it panic. Callers normally pass an [`Environment`]
/// that has been clamped by its setters, but out-of-range values still
/// produce a defined result.
pub fn advance(
    state: &GlacierState,
    env: &Environment,
    baseline: &GlacierBaseline,
) -> TickTransition {
    // Effective temperature: emissions shift the air temperature.
    let emission_impact = (env.emissions - 1.0) * EMISSION_WARMING_PER_UNIT;
    let effective_temp = env.global_temp + emission_impact;

    // Melt scales with air and ocean warmth, modulated by how sensitive
    // this glacier is. Never negative: cold cannot "unmelt" ice.
    let sensitivity_factor = baseline.temp_sensitivity / SENSITIVITY_MIDPOINT;
    let melt_rate = ((effective_temp + env.ocean_temp * OCEAN_MELT_WEIGHT + BASELINE_MELT_OFFSET)
        * sensitivity_factor)
        .max(0.0);

    // Accumulation: snowfall delivers ice, warm air converts part of it
    // to rain. Cold air (negative effective temperature) boosts it.
    let snow_retention =
        (1.0 - effective_temp * WARM_SNOW_LOSS_PER_DEGREE).max(MIN_SNOW_RETENTION);
    let accumulation = env.snowfall * BASE_ACCUMULATION * snow_retention;

    // Mass balance. The area only responds once the glacier has thinned
    // past half its initial thickness, and it never grows back.
    let raw_thickness = state.thickness + accumulation - melt_rate;
    let raw_area = if raw_thickness < baseline.initial_thickness * THIN_THRESHOLD_FRACTION {
        state.area * THIN_AREA_RETENTION
    } else {
        state.area
    };

    // Structural response. Melt dominance and ocean stress stack;
    // growth and melt dominance are mutually exclusive.
    let mut stability_delta = 0.0;
    if melt_rate > accumulation {
        stability_delta -= MELT_STRESS_PENALTY;
    }
    if env.ocean_temp > OCEAN_STRESS_THRESHOLD {
        stability_delta -= OCEAN_STRESS_PENALTY;
    }
    if accumulation > melt_rate {
        stability_delta += GROWTH_RECOVERY_BONUS;
    }

    TickTransition {
        state: GlacierState::clamped(raw_thickness, raw_area, state.stability + stability_delta),
        effective_temp,
        melt_rate,
        accumulation,
    }
}
