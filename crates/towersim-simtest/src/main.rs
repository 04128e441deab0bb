//! Tower Simulation Headless Harness
//!
//! Builds a sample tower, runs the engine for a stretch of simulated time and
//! checks the population invariants after every tick.
//! Runs entirely in-process - no rendering, no persistence.
//!
//! Usage:
//!   cargo run -p towersim-simtest
//!   cargo run -p towersim-simtest -- --seconds 7200 --seed 7 --verbose
//!   cargo run -p towersim-simtest -- --config tower.json

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use towersim_core::config::{validate_config, ConfigError};
use towersim_core::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "towersim-simtest",
    about = "Run the tower simulation headless and validate its invariants"
)]
struct Args {
    /// Seed override for the simulation RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 3600.0)]
    seconds: f32,

    /// Tick length in simulated seconds
    #[arg(long, default_value_t = 0.25)]
    dt: f32,

    /// JSON config file; defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print passing checks too
    #[arg(long)]
    verbose: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

/// Violations counted across the whole run
#[derive(Default)]
struct Tally {
    ticks: u64,
    spawns: u64,
    cap_breaches: u64,
    double_roles: Vec<String>,
    kind_mismatches: Vec<String>,
    shift_mismatches: Vec<String>,
    out_of_bounds: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    println!("=== Tower Simulation Harness ===\n");

    let mut config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.dt <= 0.0 {
        error!("--dt must be positive, got {}", args.dt);
        std::process::exit(2);
    }

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_configuration(&config));

    // 2. Full engine run
    let mut sim = match sample_tower(config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("cannot start engine: {e}");
            std::process::exit(2);
        }
    };
    let tally = run(&mut sim, args.seconds, args.dt);
    results.extend(validate_run(&sim, &tally));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    let report = sim.report();
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("\n{json}"),
        Err(e) => error!("could not serialize report: {e}"),
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Lobby, offices, food, fun and shops over six floors
fn sample_tower(config: SimConfig) -> Result<TowerSimulation, ConfigError> {
    let mut sim = TowerSimulation::new(config)?;
    sim.add_facility(Facility::new(FacilityKind::Lobby, 0, 0, 40));
    sim.add_facility(Facility::new(FacilityKind::Management, 0, 30, 6));
    sim.add_facility(Facility::new(FacilityKind::Elevator, 0, 38, 2));
    sim.add_facility(Facility::new(FacilityKind::Office, 1, 0, 10));
    sim.add_facility(Facility::new(FacilityKind::Office, 1, 12, 10));
    sim.add_facility(Facility::new(FacilityKind::Restaurant, 2, 0, 8));
    sim.add_facility(Facility::new(FacilityKind::RetailShop, 2, 10, 4));
    sim.add_facility(Facility::new(FacilityKind::Arcade, 3, 0, 6));
    sim.add_facility(Facility::new(FacilityKind::Theater, 3, 8, 12));
    sim.add_facility(Facility::new(FacilityKind::Hotel, 4, 0, 10));
    sim.add_facility(Facility::new(FacilityKind::FlagshipStore, 5, 0, 16));
    Ok(sim)
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let issues = validate_config(config);
    vec![
        TestResult::new(
            "config_valid",
            issues.is_empty(),
            if issues.is_empty() {
                "no issues".to_string()
            } else {
                format!("{issues:?}")
            },
        ),
        TestResult::new(
            "spawn_interval_floor",
            config.spawn_interval(10_000) >= config.min_spawn_interval,
            format!("dense tower interval {:.2}s", config.spawn_interval(10_000)),
        ),
    ]
}

// ── 2. Engine run ───────────────────────────────────────────────────────

fn run(sim: &mut TowerSimulation, seconds: f32, dt: f32) -> Tally {
    println!("--- Engine Run ({seconds:.0}s at dt={dt}) ---");
    let mut tally = Tally::default();
    let cap = sim.spawner.max_active_visitors as usize;
    let ticks = (seconds / dt).ceil() as u64;

    for _ in 0..ticks {
        let spawned_before = sim.spawner.total_visitors_spawned;
        let hired_before = sim.spawner.total_employees_hired;
        sim.update(dt);
        tally.ticks += 1;

        if sim.spawner.total_visitors_spawned > spawned_before {
            tally.spawns += 1;
            if sim.active_visitor_count() > cap {
                tally.cap_breaches += 1;
            }
        }
        // Hires land after the shift rule in a tick, so fresh hires are checked next tick
        let check_shifts = sim.spawner.total_employees_hired == hired_before;
        check_actors(sim, check_shifts, &mut tally);
    }

    info!(
        "Ran {} ticks, {} spawns, {} hires",
        tally.ticks, tally.spawns, sim.spawner.total_employees_hired
    );
    info!(
        "{} actors still have an urgent need",
        sim.actors_with_urgent_needs().len()
    );
    tally
}

fn check_actors(sim: &TowerSimulation, check_shifts: bool, tally: &mut Tally) {
    let hour = sim.clock.map(|c| c.hour);

    for (_, (actor, visitor, job, outing, needs, satisfaction)) in sim
        .world
        .query::<(
            &Actor,
            Option<&VisitorInfo>,
            Option<&EmploymentInfo>,
            Option<&OffDutyOuting>,
            Option<&Needs>,
            Option<&Satisfaction>,
        )>()
        .iter()
    {
        if visitor.is_some() && job.is_some() && outing.is_none() {
            tally.double_roles.push(actor.name.clone());
        }
        let kind_ok = match actor.kind {
            NpcKind::Visitor => job.is_none() && visitor.is_some(),
            NpcKind::Employee => job.is_some(),
        };
        if !kind_ok {
            tally.kind_mismatches.push(actor.name.clone());
        }
        if let (true, Some(job), Some(hour)) = (check_shifts, job, hour) {
            if job.currently_on_shift != job.covers_hour(hour) {
                tally.shift_mismatches.push(format!("{} at {hour:.2}", actor.name));
            }
        }
        if let Some(needs) = needs {
            if NeedKind::ALL
                .iter()
                .any(|&kind| !(0.0..=100.0).contains(&needs.get(kind)))
            {
                tally.out_of_bounds.push(format!("{} needs", actor.name));
            }
        }
        if let Some(satisfaction) = satisfaction {
            if !(0.0..=100.0).contains(&satisfaction.score) {
                tally.out_of_bounds.push(format!("{} satisfaction", actor.name));
            }
        }
    }
}

fn validate_run(sim: &TowerSimulation, tally: &Tally) -> Vec<TestResult> {
    let report = sim.report();
    let mut results = Vec::new();

    results.push(TestResult::new(
        "visitors_spawned",
        report.total_visitors_spawned > 0,
        format!("{} visitors spawned", report.total_visitors_spawned),
    ));
    results.push(TestResult::new(
        "visitor_cap_at_spawn",
        tally.cap_breaches == 0,
        format!("{} of {} spawns over cap", tally.cap_breaches, tally.spawns),
    ));
    results.push(TestResult::new(
        "hires_match_employees",
        report.employees as u64 == report.total_employees_hired,
        format!(
            "{} employees, {} hired",
            report.employees, report.total_employees_hired
        ),
    ));
    results.push(violations("roles_exclusive", &tally.double_roles));
    results.push(violations("kind_matches_role", &tally.kind_mismatches));
    results.push(violations("shifts_follow_clock", &tally.shift_mismatches));
    results.push(violations("levels_in_bounds", &tally.out_of_bounds));

    let overstaffed: Vec<String> = sim
        .facilities
        .iter()
        .filter(|(_, f)| f.job_openings > f.kind.required_employees())
        .map(|(id, f)| format!("{} #{}", f.kind.name(), id.0))
        .collect();
    results.push(violations("openings_within_requirement", &overstaffed));

    results
}

fn violations(name: &str, found: &[String]) -> TestResult {
    let detail = match found {
        [] => "none".to_string(),
        [first, ..] => format!("{} violations, first: {}", found.len(), first),
    };
    TestResult::new(name, found.is_empty(), detail)
}
