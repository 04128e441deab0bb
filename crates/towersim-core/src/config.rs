//! Simulation tunables and their validation.
//!
//! Every numeric policy the rules use lives here so a scenario can be
//! reshaped from a JSON file without touching code:
//!
//! ```
//! use towersim_core::config::{SimConfig, validate_config};
//!
//! let config = SimConfig::from_json_str(r#"{ "seed": 7, "max_active_visitors": 20 }"#).unwrap();
//! assert_eq!(config.max_active_visitors, 20);
//! assert!(validate_config(&config).is_empty());
//! ```

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable policy for one simulation run. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the single random source every rule draws from
    pub seed: u64,

    // Population
    pub max_active_visitors: u32,
    /// Spawn interval in seconds for an empty tower
    pub base_spawn_interval: f32,
    /// Spawn interval never drops below this
    pub min_spawn_interval: f32,
    /// How strongly each facility shortens the spawn interval
    pub spawn_density_factor: f32,
    /// Chance a new visitor is job hunting while openings exist
    pub job_seeker_chance: f64,
    /// Chance a non-job-seeking visitor arrives to shop rather than visit
    pub shopper_chance: f64,
    pub entrance_column: f32,

    // Visitor behavior
    /// A need above this sends the visitor looking for a facility
    pub need_threshold: f32,
    /// Visitors leave once every need is below this after an interaction
    pub leave_threshold: f32,
    /// Points removed from a need by one full interaction window
    pub interaction_need_reduction: f32,
    pub min_interaction_time: f32,
    pub max_interaction_time: f32,
    pub max_visit_duration: f32,
    pub min_satisfaction: f32,

    // Satisfaction
    pub satisfaction_smoothing: f32,
    /// A need above this applies the wait-time penalty
    pub penalty_threshold: f32,
    pub wait_time_penalty: f32,

    // Employment
    pub off_duty_outing_chance: f64,

    // Movement and time
    pub walk_speed: f32,
    pub floor_speed: f32,
    /// Simulated seconds per in-game hour
    pub seconds_per_hour: f32,
    pub start_hour: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_active_visitors: 50,
            base_spawn_interval: 10.0,
            min_spawn_interval: 1.0,
            spawn_density_factor: 0.1,
            job_seeker_chance: 0.4,
            shopper_chance: 0.6,
            entrance_column: 0.0,
            need_threshold: 60.0,
            leave_threshold: 30.0,
            interaction_need_reduction: 40.0,
            min_interaction_time: 15.0,
            max_interaction_time: 30.0,
            max_visit_duration: 600.0,
            min_satisfaction: 15.0,
            satisfaction_smoothing: 0.1,
            penalty_threshold: 80.0,
            wait_time_penalty: 5.0,
            off_duty_outing_chance: 0.2,
            walk_speed: 4.0,
            floor_speed: 1.0,
            seconds_per_hour: 60.0,
            start_hour: 8.0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Pass the config through if [`validate_config`] finds nothing wrong
    pub fn validated(self) -> Result<Self, ConfigError> {
        let issues = validate_config(&self);
        if !issues.is_empty() {
            for issue in &issues {
                warn!("Rejected config: {:?}", issue);
            }
            return Err(ConfigError::Invalid(issues));
        }
        Ok(self)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Spawn interval for a tower holding `facility_count` facilities.
    /// Denser towers spawn faster.
    pub fn spawn_interval(&self, facility_count: usize) -> f32 {
        let scaled = self.base_spawn_interval / (1.0 + facility_count as f32 * self.spawn_density_factor);
        scaled.max(self.min_spawn_interval)
    }
}

/// Failure to obtain a usable [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0:?}")]
    Invalid(Vec<ConfigIssue>),
}

/// One problem found by [`validate_config`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// A probability outside [0, 1]
    ChanceOutOfRange(&'static str, f64),
    /// A duration, speed or rate that must be positive
    NotPositive(&'static str, f32),
    /// A need level outside [0, 100]
    LevelOutOfRange(&'static str, f32),
    /// min_interaction_time is above max_interaction_time
    InteractionWindowInverted { min: f32, max: f32 },
    /// min_spawn_interval is above base_spawn_interval
    SpawnIntervalInverted { min: f32, base: f32 },
    /// leave_threshold must sit below need_threshold or visitors never settle
    ThresholdsInverted { leave: f32, need: f32 },
    StartHourOutOfRange(f32),
}

/// Validate a configuration, returning all issues found
pub fn validate_config(config: &SimConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for (name, chance) in [
        ("job_seeker_chance", config.job_seeker_chance),
        ("shopper_chance", config.shopper_chance),
        ("off_duty_outing_chance", config.off_duty_outing_chance),
    ] {
        if !(0.0..=1.0).contains(&chance) {
            issues.push(ConfigIssue::ChanceOutOfRange(name, chance));
        }
    }

    for (name, value) in [
        ("base_spawn_interval", config.base_spawn_interval),
        ("min_spawn_interval", config.min_spawn_interval),
        ("min_interaction_time", config.min_interaction_time),
        ("max_interaction_time", config.max_interaction_time),
        ("max_visit_duration", config.max_visit_duration),
        ("satisfaction_smoothing", config.satisfaction_smoothing),
        ("walk_speed", config.walk_speed),
        ("floor_speed", config.floor_speed),
        ("seconds_per_hour", config.seconds_per_hour),
    ] {
        if !(value > 0.0) {
            issues.push(ConfigIssue::NotPositive(name, value));
        }
    }
    if config.spawn_density_factor < 0.0 {
        issues.push(ConfigIssue::NotPositive(
            "spawn_density_factor",
            config.spawn_density_factor,
        ));
    }

    for (name, level) in [
        ("need_threshold", config.need_threshold),
        ("leave_threshold", config.leave_threshold),
        ("interaction_need_reduction", config.interaction_need_reduction),
        ("min_satisfaction", config.min_satisfaction),
        ("penalty_threshold", config.penalty_threshold),
    ] {
        if !(0.0..=100.0).contains(&level) {
            issues.push(ConfigIssue::LevelOutOfRange(name, level));
        }
    }

    if config.min_interaction_time >= config.max_interaction_time {
        issues.push(ConfigIssue::InteractionWindowInverted {
            min: config.min_interaction_time,
            max: config.max_interaction_time,
        });
    }
    if config.min_spawn_interval > config.base_spawn_interval {
        issues.push(ConfigIssue::SpawnIntervalInverted {
            min: config.min_spawn_interval,
            base: config.base_spawn_interval,
        });
    }
    if config.leave_threshold >= config.need_threshold {
        issues.push(ConfigIssue::ThresholdsInverted {
            leave: config.leave_threshold,
            need: config.need_threshold,
        });
    }
    if !(0.0..24.0).contains(&config.start_hour) {
        issues.push(ConfigIssue::StartHourOutOfRange(config.start_hour));
    }

    issues
}
