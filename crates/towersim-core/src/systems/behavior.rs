//! Visitor behavior - where visitors go, what they do there, and when they leave.
//!
//! Three rules share the visitor state machine
//! (`Visiting | Shopping | JobSeeking | Leaving`, orthogonal to motion):
//! - [`destination_system`] picks a facility for the most pressing need
//! - [`interaction_system`] runs the interaction window at the destination
//! - [`visitor_lifecycle_system`] tracks visit time and decides to leave

use hecs::World;
use log::debug;
use rand::Rng;

use crate::components::{
    Actor, FacilityKind, FacilityRegistry, NeedKind, Needs, Satisfaction, VisitorActivity,
    VisitorInfo, GROUND_FLOOR,
};
use crate::config::SimConfig;

/// Facility kind to visit for a need. Equally good kinds are picked at random.
pub fn pick_facility_kind(need: NeedKind, rng: &mut impl Rng) -> FacilityKind {
    let kinds = FacilityKind::serving(need);
    if kinds.len() == 1 {
        kinds[0]
    } else {
        kinds[rng.gen_range(0..kinds.len())]
    }
}

/// Send visitors with an urgent need toward the first facility that serves it.
/// Run every few seconds, not every frame.
pub fn destination_system(
    world: &mut World,
    facilities: &FacilityRegistry,
    config: &SimConfig,
    rng: &mut impl Rng,
) {
    for (_, (actor, visitor, needs)) in
        world.query_mut::<(&mut Actor, &mut VisitorInfo, &Needs)>()
    {
        if visitor.activity.is_engaged_elsewhere() || visitor.is_interacting {
            continue;
        }

        let (need, level) = needs.highest();
        if level <= config.need_threshold {
            continue;
        }

        let kind = pick_facility_kind(need, rng);
        let Some((_, facility)) = facilities.first_of_kind(kind) else {
            continue;
        };

        actor.set_destination(
            facility.floor,
            facility.center_column(),
            format!("{} - heading to {}", need.label(), kind.name()),
        );
        visitor.target_facility_floor = Some(facility.floor);
        visitor.reset_interaction();
        visitor.activity = if kind.is_retail() {
            VisitorActivity::Shopping
        } else {
            VisitorActivity::Visiting
        };
        debug!("{} heading to {} on floor {}", actor.name, kind.name(), facility.floor);
    }
}

/// Run interaction windows for visitors standing at their destination and
/// refresh facility occupancy. Run every frame.
///
/// A full window removes exactly `interaction_need_reduction` points from the
/// need each covering facility serves, whatever the window's random length.
pub fn interaction_system(
    world: &mut World,
    facilities: &mut FacilityRegistry,
    config: &SimConfig,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    for (_, facility) in facilities.iter_mut() {
        facility.occupancy = 0;
    }

    for (_, (actor, visitor, needs)) in
        world.query_mut::<(&mut Actor, &mut VisitorInfo, &mut Needs)>()
    {
        if visitor.activity.is_engaged_elsewhere() || !actor.is_at_destination() {
            continue;
        }

        if !visitor.is_interacting {
            // One window per destination
            if visitor.required_interaction_time > 0.0 {
                continue;
            }
            visitor.is_interacting = true;
            visitor.interaction_time = 0.0;
            visitor.required_interaction_time =
                rng.gen_range(config.min_interaction_time..config.max_interaction_time);
        }

        let required = visitor.required_interaction_time;
        let step = delta_seconds.min(required - visitor.interaction_time).max(0.0);
        visitor.interaction_time += step;

        let reduction = config.interaction_need_reduction / required * step;
        for (_, facility) in facilities.iter_mut() {
            if !facility.contains(actor.current_floor, actor.current_column) {
                continue;
            }
            facility.occupancy += 1;
            if let Some(need) = facility.kind.serves() {
                needs.reduce(need, reduction);
            }
        }

        if required - visitor.interaction_time <= required * f32::EPSILON {
            visitor.interaction_time = required;
            visitor.is_interacting = false;
            if needs.highest_value() < config.leave_threshold {
                start_leaving(actor, visitor, config);
            }
        }
    }
}

/// Accumulate visit time and send visitors home when the stay stops being
/// worthwhile. Run every frame.
pub fn visitor_lifecycle_system(world: &mut World, config: &SimConfig, delta_seconds: f32) {
    for (_, (actor, visitor, satisfaction)) in
        world.query_mut::<(&mut Actor, &mut VisitorInfo, Option<&Satisfaction>)>()
    {
        visitor.visit_duration += delta_seconds;
        if actor.is_at_destination() {
            visitor.time_at_destination += delta_seconds;
        }

        if visitor.is_leaving() {
            continue;
        }
        if should_leave(visitor, satisfaction, config) {
            start_leaving(actor, visitor, config);
        }
    }
}

/// Leave policy: stayed too long, or too unhappy to stay
pub fn should_leave(
    visitor: &VisitorInfo,
    satisfaction: Option<&Satisfaction>,
    config: &SimConfig,
) -> bool {
    visitor.visit_duration > config.max_visit_duration
        || satisfaction.is_some_and(|s| s.score < config.min_satisfaction)
}

/// Switch to `Leaving` and head for the ground-floor exit
pub(crate) fn start_leaving(actor: &mut Actor, visitor: &mut VisitorInfo, config: &SimConfig) {
    visitor.activity = VisitorActivity::Leaving;
    visitor.is_interacting = false;
    visitor.target_facility_floor = Some(GROUND_FLOOR);
    actor.set_destination(GROUND_FLOOR, config.entrance_column, "Leaving");
    debug!("{} is leaving after {:.0}s", actor.name, visitor.visit_duration);
}
