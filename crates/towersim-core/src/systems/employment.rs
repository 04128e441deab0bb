//! Employment system - shift schedules and off-duty outings

use hecs::World;
use log::debug;
use rand::Rng;

use crate::clock::GameClock;
use crate::components::{
    Actor, Archetype, EmploymentInfo, MotionState, Needs, OffDutyOuting, Satisfaction,
    VisitorActivity, VisitorInfo,
};
use crate::config::SimConfig;

pub const OFF_DUTY_STATUS: &str = "Off duty";

/// Put employees on or off shift based on the hour of day.
/// Run every frame; does nothing without a clock.
pub fn employment_system(world: &mut World, clock: Option<&GameClock>) {
    let Some(clock) = clock else {
        return;
    };

    let mut outings_to_end = Vec::new();

    for (entity, (actor, job, outing)) in
        world.query_mut::<(&mut Actor, &mut EmploymentInfo, Option<&OffDutyOuting>)>()
    {
        let should_be_working = job.covers_hour(clock.hour);

        if should_be_working && !job.currently_on_shift {
            job.currently_on_shift = true;
            actor.set_destination(job.workplace_floor, job.workplace_column, job.job_title.clone());
            if outing.is_some() {
                outings_to_end.push(entity);
            }
            debug!("{} starting shift as {}", actor.name, job.job_title);
        } else if !should_be_working && job.currently_on_shift {
            job.currently_on_shift = false;
            actor.status = OFF_DUTY_STATUS.to_string();
            debug!("{} going off duty", actor.name);
        } else if job.currently_on_shift && actor.status != job.job_title {
            actor.status.clone_from(&job.job_title);
        }
    }

    for entity in outings_to_end {
        strip_outing_role(world, entity);
    }
}

/// Give some off-duty employees a temporary visitor role.
/// Each candidate gets an independent trial per call; run every 30 seconds.
pub fn off_duty_outing_system(world: &mut World, config: &SimConfig, rng: &mut impl Rng) {
    let candidates: Vec<hecs::Entity> = world
        .query::<(&EmploymentInfo, Option<&VisitorInfo>)>()
        .iter()
        .filter(|(_, (job, visitor))| !job.currently_on_shift && visitor.is_none())
        .map(|(entity, _)| entity)
        .collect();

    for entity in candidates {
        if !rng.gen_bool(config.off_duty_outing_chance) {
            continue;
        }
        let needs = Needs::random(Archetype::Casual, rng);
        let _ = world.insert(
            entity,
            (
                VisitorInfo::new(VisitorActivity::Visiting),
                needs,
                Satisfaction::default(),
                OffDutyOuting,
            ),
        );
        // Standing at the workplace is not a destination for the outing
        if let Ok(mut actor) = world.get::<&mut Actor>(entity) {
            actor.motion = MotionState::Idle;
            actor.status = "Off duty - out and about".to_string();
            debug!("{} heading out on a break", actor.name);
        }
    }
}

/// Drop the temporary visitor role; the employee record is untouched
pub(crate) fn strip_outing_role(world: &mut World, entity: hecs::Entity) {
    let _ = world.remove_one::<VisitorInfo>(entity);
    let _ = world.remove_one::<Needs>(entity);
    let _ = world.remove_one::<Satisfaction>(entity);
    let _ = world.remove_one::<OffDutyOuting>(entity);
}
