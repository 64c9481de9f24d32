/// Command-line runner for the firn glacier simulation: pick a glacier,
/// fix or script the environment, run to collapse or the year cap, and
/// score the result.

mod catalog;
mod leaderboard;
mod schedule;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use firn_core::environment::EnvFactor;
use firn_core::scenario::GlacierScenario;
use firn_core::simulation::{Simulation, Step};
use leaderboard::LeaderboardEntry;
use schedule::Schedule;

#[derive(Parser, Debug)]
#[command(name = "firn-cli", about = "Glacier survival simulation runner")]
struct Args {
    /// List the built-in glaciers and exit.
    #[arg(long)]
    list: bool,

    /// Built-in glacier to simulate (case-insensitive prefix is enough).
    #[arg(short, long, default_value = "Equinox Fields")]
    scenario: String,

    /// Load the scenario from a JSON file instead of the catalogue.
    #[arg(long, value_name = "FILE")]
    scenario_file: Option<PathBuf>,

    /// Global temperature offset in °C (-5 to 5).
    #[arg(long, default_value_t = 0.0)]
    temp: f64,

    /// Snowfall multiplier (0 to 2).
    #[arg(long, default_value_t = 1.0)]
    snowfall: f64,

    /// Emissions multiplier (0 to 2).
    #[arg(long, default_value_t = 1.0)]
    emissions: f64,

    /// Ocean temperature offset in °C (-2 to 2).
    #[arg(long, default_value_t = 0.0)]
    ocean: f64,

    /// JSON file of scheduled factor changes: [{"year","factor","value"}].
    #[arg(long, value_name = "FILE")]
    schedule: Option<PathBuf>,

    /// Count the run as survived after this many years; 0 means no cap.
    #[arg(long, default_value_t = 100)]
    years: u32,

    /// Tick on the wall clock (one year per second) instead of stepping
    /// as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Log a progress line every N years (0 silences progress).
    #[arg(long, default_value_t = 10)]
    every: u32,

    /// Record the scored run in this leaderboard file and show the top ten.
    #[arg(long, value_name = "FILE")]
    leaderboard: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        print_catalogue();
        return Ok(());
    }
    if args.years == 0 && !args.realtime {
        bail!("--years 0 (no cap) only makes sense with --realtime");
    }

    let scenario = load_scenario(&args)?;
    let mut schedule = match &args.schedule {
        Some(path) => {
            let schedule = Schedule::from_path(path)?;
            if schedule.is_empty() {
                warn!("schedule {} contains no changes", path.display());
            }
            schedule
        }
        None => Schedule::default(),
    };

    let mut sim = Simulation::new(scenario)?;
    if args.years > 0 {
        sim.set_year_cap(Some(args.years));
    }
    apply_fixed_environment(&mut sim, &args);

    sim.start();
    info!("simulating {} from year {}", sim.name(), sim.year());

    if args.realtime {
        run_realtime(&mut sim, &mut schedule, args.every);
    } else {
        run_fast(&mut sim, &mut schedule, args.every);
    }

    print_report(&sim);
    if let Some(path) = &args.leaderboard {
        record_leaderboard(path, &sim)?;
    }
    Ok(())
}

fn load_scenario(args: &Args) -> Result<GlacierScenario> {
    if let Some(path) = &args.scenario_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario = GlacierScenario::from_json(&raw)
            .with_context(|| format!("in scenario file {}", path.display()))?;
        Ok(scenario)
    } else {
        catalog::find(&args.scenario)
            .map(|entry| entry.scenario)
            .ok_or_else(|| anyhow!("no built-in glacier matches '{}' (try --list)", args.scenario))
    }
}

fn apply_fixed_environment(sim: &mut Simulation, args: &Args) {
    let requested = [
        (EnvFactor::GlobalTemp, args.temp),
        (EnvFactor::Snowfall, args.snowfall),
        (EnvFactor::Emissions, args.emissions),
        (EnvFactor::OceanTemp, args.ocean),
    ];
    for (factor, value) in requested {
        let stored = sim.set_factor(factor, value);
        if (stored - value).abs() > f64::EPSILON {
            warn!("{factor} {value} is out of range, clamped to {stored}");
        }
    }
}

fn run_fast(sim: &mut Simulation, schedule: &mut Schedule, every: u32) {
    loop {
        apply_due_changes(sim, schedule);
        match sim.tick() {
            Step::Advanced => log_progress(sim, every),
            Step::Finished(outcome) => {
                info!("run finished: {outcome} in year {}", sim.year());
                break;
            }
            Step::Idle => break,
        }
    }
}

fn run_realtime(sim: &mut Simulation, schedule: &mut Schedule, every: u32) {
    let started = Instant::now();
    loop {
        apply_due_changes(sim, schedule);
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        match sim.poll(now_ms) {
            Step::Advanced => log_progress(sim, every),
            Step::Finished(outcome) => {
                info!("run finished: {outcome} in year {}", sim.year());
                break;
            }
            Step::Idle => thread::sleep(Duration::from_millis(25)),
        }
    }
}

fn apply_due_changes(sim: &mut Simulation, schedule: &mut Schedule) {
    let year = sim.year();
    for change in schedule.due(year) {
        let stored = sim.set_factor(change.factor, change.value);
        if (stored - change.value).abs() > f64::EPSILON {
            warn!(
                "year {year}: {} {} is out of range, clamped to {stored}",
                change.factor, change.value
            );
        } else {
            info!("year {year}: {} set to {stored}", change.factor);
        }
    }
}

fn log_progress(sim: &Simulation, every: u32) {
    if every == 0 || sim.years_survived() % every != 0 {
        return;
    }
    let state = sim.state();
    info!(
        "year {}: thickness {:.1} m, area {:.1} km², stability {:.0}%, health {:.0}%",
        sim.year(),
        state.thickness,
        state.area,
        state.stability,
        sim.health()
    );
}

fn print_catalogue() {
    println!("Built-in glaciers:");
    for entry in catalog::builtin() {
        let s = &entry.scenario;
        println!(
            "  {:<16} {:>6.0} m thick, {:>5.0} km², sensitivity {}",
            s.name, s.ice_thickness, s.surface_area, s.temp_sensitivity
        );
        println!("      {}", entry.blurb);
    }
}

fn print_report(sim: &Simulation) {
    let summary = sim.summary();
    let score = summary.score();
    let outcome = match sim.outcome() {
        Some(outcome) => outcome.to_string(),
        None => "stopped".to_string(),
    };

    println!();
    println!("{}: {} in year {}", summary.glacier_name, outcome, sim.year());
    println!("  years survived   {}", summary.years_survived);
    println!("  final thickness  {:.1} m", summary.final_thickness);
    println!("  final stability  {:.0}%", summary.final_stability);
    println!("  final ice volume {:.1} km³", summary.final_ice_volume / 1000.0);
    println!("  score            {score} (grade {})", summary.grade());
}

fn record_leaderboard(path: &Path, sim: &Simulation) -> Result<()> {
    let entries = leaderboard::record(path, LeaderboardEntry::from_summary(sim.summary()))?;
    println!();
    println!("Top runs in {}:", path.display());
    for (rank, entry) in leaderboard::top(&entries).iter().enumerate() {
        println!(
            "  {:>2}. {:<16} {:>6} pts  {:>4} years",
            rank + 1,
            entry.summary.glacier_name,
            entry.score,
            entry.summary.years_survived
        );
    }
    Ok(())
}
