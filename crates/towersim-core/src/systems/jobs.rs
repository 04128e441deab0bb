//! Job market - keeps facility openings current and hires job seekers into them.
//!
//! Openings are recomputed on a slower cadence than matching, so between
//! recomputations the matcher works from a possibly stale count. Within one
//! matcher pass every hire reserves its opening immediately, so a facility's
//! count can never be overdrawn by that pass.

use hecs::World;
use log::info;

use crate::components::{
    Actor, EmploymentInfo, FacilityId, FacilityRegistry, JobPosting, MotionState, Needs, NpcKind,
    Satisfaction, VisitorActivity, VisitorInfo, GROUND_FLOOR,
};
use crate::systems::employment::OFF_DUTY_STATUS;
use crate::systems::Spawner;

/// Recompute `job_openings` and `current_staff` for every facility
pub fn recompute_job_openings(world: &World, facilities: &mut FacilityRegistry) {
    let staff: Vec<(i32, f32, bool)> = world
        .query::<&EmploymentInfo>()
        .iter()
        .map(|(_, job)| (job.workplace_floor, job.workplace_column, job.currently_on_shift))
        .collect();

    for (_, facility) in facilities.iter_mut() {
        let employed_on_floor = staff
            .iter()
            .filter(|(floor, _, _)| *floor == facility.floor)
            .count() as u32;
        facility.job_openings = facility
            .kind
            .required_employees()
            .saturating_sub(employed_on_floor);

        let center = facility.center_column();
        facility.current_staff = staff
            .iter()
            .filter(|(floor, column, on_shift)| {
                *on_shift && *floor == facility.floor && *column == center
            })
            .count() as u32;
    }
}

/// Hire job seekers waiting idle on the ground floor into the first open
/// position, in facility registration order. Returns the number hired.
pub fn job_matcher_system(
    world: &mut World,
    facilities: &mut FacilityRegistry,
    spawner: &mut Spawner,
) -> u32 {
    let seekers: Vec<hecs::Entity> = world
        .query::<(&Actor, &VisitorInfo)>()
        .iter()
        .filter(|(_, (actor, visitor))| {
            visitor.activity == VisitorActivity::JobSeeking
                && actor.kind == NpcKind::Visitor
                && actor.motion == MotionState::Idle
                && actor.current_floor == GROUND_FLOOR
        })
        .map(|(entity, _)| entity)
        .collect();

    let mut hired = 0;
    for entity in seekers {
        let Some((facility_id, posting, floor, column)) = reserve_opening(facilities) else {
            // Nothing left to offer anyone this pass
            break;
        };
        hire(world, entity, posting, floor, column);
        spawner.total_employees_hired += 1;
        hired += 1;
        info!(
            "Hired {} as {} at facility {} (floor {})",
            actor_name(world, entity),
            posting.title,
            facility_id.0,
            floor
        );
    }
    hired
}

/// Take one opening from the first facility that has one and is hiring
fn reserve_opening(facilities: &mut FacilityRegistry) -> Option<(FacilityId, JobPosting, i32, f32)> {
    for (id, facility) in facilities.iter_mut() {
        if facility.job_openings == 0 {
            continue;
        }
        let Some(posting) = facility.kind.job_posting() else {
            continue;
        };
        facility.job_openings -= 1;
        return Some((id, posting, facility.floor, facility.center_column()));
    }
    None
}

/// Convert a visitor into an employee. The visitor role is dropped entirely.
fn hire(world: &mut World, entity: hecs::Entity, posting: JobPosting, floor: i32, column: f32) {
    let _ = world.remove_one::<VisitorInfo>(entity);
    let _ = world.remove_one::<Needs>(entity);
    let _ = world.remove_one::<Satisfaction>(entity);
    let _ = world.insert_one(
        entity,
        EmploymentInfo {
            job_title: posting.title.to_string(),
            workplace_floor: floor,
            workplace_column: column,
            shift_start_hour: posting.shift_start_hour,
            shift_end_hour: posting.shift_end_hour,
            currently_on_shift: false,
        },
    );
    // Not on shift until the shift rule says so
    if let Ok(mut actor) = world.get::<&mut Actor>(entity) {
        actor.kind = NpcKind::Employee;
        actor.status = OFF_DUTY_STATUS.to_string();
    }
}

fn actor_name(world: &World, entity: hecs::Entity) -> String {
    world
        .get::<&Actor>(entity)
        .map(|actor| actor.name.clone())
        .unwrap_or_default()
}
