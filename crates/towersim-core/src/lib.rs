//! Tower Simulation Core - visitor and employee lifecycle engine
//!
//! A tick-driven simulation of the people moving through a building: visitors
//! arrive, chase their needs from restaurant to arcade to shop, sometimes take
//! a job, work their shifts, and eventually leave.
//!
//! # Architecture
//!
//! Actors live in an Entity Component System (ECS) world via `hecs`:
//! - **Entities**: visitors and employees
//! - **Components**: pure data attached to actors (Actor, Needs, VisitorInfo,
//!   EmploymentInfo, ...)
//! - **Systems**: rules that query and update components, run in a fixed
//!   order once per tick by [`engine::TowerSimulation`]
//!
//! Facilities are not entities; they live in a [`components::FacilityRegistry`]
//! whose registration order doubles as lookup priority.
//!
//! # Example
//!
//! ```rust,no_run
//! use towersim_core::prelude::*;
//!
//! let mut sim = TowerSimulation::new(SimConfig::default()).expect("default config is valid");
//! sim.add_facility(Facility::new(FacilityKind::Restaurant, 2, 0, 6));
//! sim.add_facility(Facility::new(FacilityKind::Office, 3, 0, 8));
//!
//! loop {
//!     sim.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::GameClock;
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{PopulationReport, TowerSimulation};
}
