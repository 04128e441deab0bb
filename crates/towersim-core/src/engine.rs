//! Simulation engine - main entry point for running the tower simulation

use hecs::World;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::clock::{GameClock, IntervalTimer};
use crate::components::*;
use crate::config::{ConfigError, SimConfig};
use crate::systems::*;

/// Periods of the throttled rules, in simulated seconds
const NEEDS_PERIOD: f32 = 1.0;
const DESTINATION_PERIOD: f32 = 5.0;
const SATISFACTION_PERIOD: f32 = 2.0;
const OUTING_PERIOD: f32 = 30.0;
const OPENINGS_PERIOD: f32 = 5.0;
const MATCHER_PERIOD: f32 = 2.0;
const CLEANUP_PERIOD: f32 = 2.0;

/// One timer per throttled rule
#[derive(Debug, Clone)]
struct RuleTimers {
    needs: IntervalTimer,
    destination: IntervalTimer,
    satisfaction: IntervalTimer,
    outing: IntervalTimer,
    openings: IntervalTimer,
    matcher: IntervalTimer,
    cleanup: IntervalTimer,
}

impl RuleTimers {
    fn new() -> Self {
        Self {
            needs: IntervalTimer::new(NEEDS_PERIOD),
            destination: IntervalTimer::new(DESTINATION_PERIOD),
            satisfaction: IntervalTimer::new(SATISFACTION_PERIOD),
            outing: IntervalTimer::new(OUTING_PERIOD),
            openings: IntervalTimer::new(OPENINGS_PERIOD),
            matcher: IntervalTimer::new(MATCHER_PERIOD),
            cleanup: IntervalTimer::new(CLEANUP_PERIOD),
        }
    }
}

/// Snapshot of population counters for external reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationReport {
    pub sim_seconds: f64,
    pub day: Option<u32>,
    pub hour: Option<f32>,
    pub active_visitors: usize,
    pub employees: usize,
    pub employees_on_shift: usize,
    pub employees_on_outing: usize,
    pub total_visitors_spawned: u64,
    pub total_employees_hired: u64,
    pub total_job_openings: u32,
    pub average_satisfaction: Option<f32>,
}

/// Main simulation engine. Owns the actor world, the facility registry and
/// every piece of shared state the rules read and write.
pub struct TowerSimulation {
    /// ECS world containing all actors
    pub world: World,
    pub facilities: FacilityRegistry,
    pub spawner: Spawner,
    /// Day/hour provider. Shift rules skip while this is `None`.
    pub clock: Option<GameClock>,
    pub config: SimConfig,
    /// Simulated seconds since start
    pub sim_time: f64,
    rng: StdRng,
    timers: RuleTimers,
}

impl TowerSimulation {
    /// Build an engine for a validated config. Rules draw ranges and chances
    /// straight from the config, so an invalid one is rejected here.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_valid(config.validated()?))
    }

    fn from_valid(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            facilities: FacilityRegistry::new(),
            spawner: Spawner::new(config.max_active_visitors),
            clock: Some(GameClock::new(config.start_hour, config.seconds_per_hour)),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            sim_time: 0.0,
            timers: RuleTimers::new(),
        }
    }

    /// Run without a day/hour provider
    pub fn without_clock(mut self) -> Self {
        self.clock = None;
        self
    }

    pub fn add_facility(&mut self, facility: Facility) -> FacilityId {
        info!(
            "Registered {} on floor {} at column {}",
            facility.kind.name(),
            facility.floor,
            facility.column
        );
        self.facilities.register(facility)
    }

    /// Advance the simulation by `delta_seconds`. Rules run in a fixed order.
    pub fn update(&mut self, delta_seconds: f32) {
        self.sim_time += delta_seconds as f64;
        if let Some(clock) = self.clock.as_mut() {
            clock.advance(delta_seconds);
        }

        // Movement (every frame)
        movement_system(&mut self.world, delta_seconds);

        // Needs (1 Hz)
        if let Some(elapsed) = self.timers.needs.tick(delta_seconds) {
            needs_system(&mut self.world, elapsed);
        }

        // Visitor behavior
        if self.timers.destination.tick(delta_seconds).is_some() {
            destination_system(&mut self.world, &self.facilities, &self.config, &mut self.rng);
        }
        interaction_system(
            &mut self.world,
            &mut self.facilities,
            &self.config,
            &mut self.rng,
            delta_seconds,
        );
        visitor_lifecycle_system(&mut self.world, &self.config, delta_seconds);

        if self.timers.satisfaction.tick(delta_seconds).is_some() {
            satisfaction_system(&mut self.world, &self.config);
        }

        // Employment
        employment_system(&mut self.world, self.clock.as_ref());
        if self.timers.outing.tick(delta_seconds).is_some() {
            off_duty_outing_system(&mut self.world, &self.config, &mut self.rng);
        }

        // Job market: openings are refreshed before matching
        if self.timers.openings.tick(delta_seconds).is_some() {
            recompute_job_openings(&self.world, &mut self.facilities);
        }
        if self.timers.matcher.tick(delta_seconds).is_some() {
            job_matcher_system(&mut self.world, &mut self.facilities, &mut self.spawner);
        }

        // Population
        spawn_system(
            &mut self.world,
            &self.facilities,
            &mut self.spawner,
            &self.config,
            &mut self.rng,
            delta_seconds,
        );
        if self.timers.cleanup.tick(delta_seconds).is_some() {
            cleanup_system(&mut self.world);
        }
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn actor_count(&self) -> usize {
        self.world.query::<&Actor>().iter().count()
    }

    pub fn active_visitor_count(&self) -> usize {
        active_visitor_count(&self.world)
    }

    pub fn employee_count(&self) -> usize {
        self.world.query::<(&Actor, &EmploymentInfo)>().iter().count()
    }

    /// Status text of every actor, for display
    pub fn statuses(&self) -> Vec<(String, String)> {
        self.world
            .query::<&Actor>()
            .iter()
            .map(|(_, actor)| (actor.name.clone(), actor.status.clone()))
            .collect()
    }

    /// Actors whose highest need is above `need_threshold`
    pub fn actors_with_urgent_needs(&self) -> Vec<(hecs::Entity, NeedKind)> {
        find_urgent_needs(&self.world, self.config.need_threshold)
    }

    pub fn report(&self) -> PopulationReport {
        let mut on_shift = 0;
        let mut employees = 0;
        for (_, job) in self.world.query::<&EmploymentInfo>().iter() {
            employees += 1;
            if job.currently_on_shift {
                on_shift += 1;
            }
        }

        let scores: Vec<f32> = self
            .world
            .query::<&Satisfaction>()
            .iter()
            .map(|(_, s)| s.score)
            .collect();
        let average_satisfaction =
            (!scores.is_empty()).then(|| scores.iter().sum::<f32>() / scores.len() as f32);

        PopulationReport {
            sim_seconds: self.sim_time,
            day: self.clock.map(|c| c.day),
            hour: self.clock.map(|c| c.hour),
            active_visitors: self.active_visitor_count(),
            employees,
            employees_on_shift: on_shift,
            employees_on_outing: self.world.query::<&OffDutyOuting>().iter().count(),
            total_visitors_spawned: self.spawner.total_visitors_spawned,
            total_employees_hired: self.spawner.total_employees_hired,
            total_job_openings: self.facilities.total_openings(),
            average_satisfaction,
        }
    }
}

impl Default for TowerSimulation {
    fn default() -> Self {
        Self::from_valid(SimConfig::default())
    }
}
