//! Population controller - throttled visitor spawning and removal of departed actors

use hecs::World;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{
    Actor, Archetype, FacilityRegistry, Locomotion, Needs, NpcKind, OffDutyOuting, Satisfaction,
    VisitorActivity, VisitorInfo, GROUND_FLOOR,
};
use crate::config::SimConfig;
use crate::systems::employment::{strip_outing_role, OFF_DUTY_STATUS};

/// Spawn throttle and population counters (singleton, stored in engine)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub time_since_last_spawn: f32,
    pub max_active_visitors: u32,
    pub next_visitor_id: u64,
    pub total_visitors_spawned: u64,
    pub total_employees_hired: u64,
}

impl Spawner {
    pub fn new(max_active_visitors: u32) -> Self {
        Self {
            max_active_visitors,
            next_visitor_id: 1,
            ..Default::default()
        }
    }

    /// Hand out the next visitor id. Ids only ever increase.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_visitor_id;
        self.next_visitor_id += 1;
        id
    }
}

/// Actors currently playing the visitor role by kind
pub fn active_visitor_count(world: &World) -> usize {
    world
        .query::<&Actor>()
        .iter()
        .filter(|(_, actor)| actor.kind == NpcKind::Visitor)
        .count()
}

/// Spawn at most one visitor once the interval has elapsed and the tower
/// has room. Run every frame.
pub fn spawn_system(
    world: &mut World,
    facilities: &FacilityRegistry,
    spawner: &mut Spawner,
    config: &SimConfig,
    rng: &mut impl Rng,
    delta_seconds: f32,
) -> Option<hecs::Entity> {
    spawner.time_since_last_spawn += delta_seconds;

    if active_visitor_count(world) >= spawner.max_active_visitors as usize {
        return None;
    }

    let interval = config.spawn_interval(facilities.len());
    if spawner.time_since_last_spawn < interval {
        return None;
    }
    spawner.time_since_last_spawn = 0.0;

    Some(spawn_visitor(world, facilities, spawner, config, rng))
}

/// Create one visitor at the ground-floor entrance
pub fn spawn_visitor(
    world: &mut World,
    facilities: &FacilityRegistry,
    spawner: &mut Spawner,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> hecs::Entity {
    let id = spawner.next_id();
    spawner.total_visitors_spawned += 1;

    let activity = if facilities.any_openings() && rng.gen_bool(config.job_seeker_chance) {
        VisitorActivity::JobSeeking
    } else if rng.gen_bool(config.shopper_chance) {
        VisitorActivity::Shopping
    } else {
        VisitorActivity::Visiting
    };
    let archetype = Archetype::random(rng);

    let mut actor = Actor::new(
        format!("Visitor {id}"),
        NpcKind::Visitor,
        GROUND_FLOOR,
        config.entrance_column,
    );
    let mut visitor = VisitorInfo::new(activity);

    if activity == VisitorActivity::JobSeeking {
        actor.status = "Looking for work".to_string();
    } else {
        let destinations = facilities.spawn_destinations();
        let chosen = (!destinations.is_empty())
            .then(|| destinations[rng.gen_range(0..destinations.len())])
            .and_then(|fid| facilities.get(fid));
        match chosen {
            Some(facility) => {
                actor.set_destination(
                    facility.floor,
                    facility.center_column(),
                    format!("Heading to {}", facility.kind.name()),
                );
                visitor.target_facility_floor = Some(facility.floor);
            }
            None => actor.status = "Browsing".to_string(),
        }
    }

    debug!("Spawned {} ({:?}, {:?})", actor.name, archetype, activity);

    world.spawn((
        actor,
        Locomotion::new(config.walk_speed, config.floor_speed),
        visitor,
        Needs::random(archetype, rng),
        Satisfaction::default(),
    ))
}

/// Remove visitors who have walked out of the ground-floor exit.
/// Employees on an outing lose the visitor role instead. Returns the number removed.
pub fn cleanup_system(world: &mut World) -> usize {
    let mut departed = Vec::new();
    let mut returning = Vec::new();

    for (entity, (actor, visitor, outing)) in world
        .query::<(&Actor, &VisitorInfo, Option<&OffDutyOuting>)>()
        .iter()
    {
        if visitor.is_leaving() && actor.is_at_destination() && actor.current_floor == GROUND_FLOOR {
            if outing.is_some() {
                returning.push(entity);
            } else {
                departed.push(entity);
            }
        }
    }

    for &entity in &departed {
        let _ = world.despawn(entity);
    }

    for entity in returning {
        strip_outing_role(world, entity);
        if let Ok(mut actor) = world.get::<&mut Actor>(entity) {
            actor.status = OFF_DUTY_STATUS.to_string();
        }
    }

    if !departed.is_empty() {
        debug!("{} visitors left the tower", departed.len());
    }
    departed.len()
}
