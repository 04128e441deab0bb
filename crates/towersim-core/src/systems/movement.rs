//! Movement system - carries actors toward the destination set on them.
//!
//! Rules only ever call [`Actor::set_destination`] and read back
//! [`MotionState`]; this is the collaborator that closes the loop.

use crate::components::{Actor, Locomotion, MotionState};
use hecs::World;

/// Move every `Moving` actor: ride to the target floor first, then walk to the column
pub fn movement_system(world: &mut World, delta_seconds: f32) {
    for (_, (actor, locomotion)) in world.query_mut::<(&mut Actor, &mut Locomotion)>() {
        if actor.motion == MotionState::Moving {
            step_actor(actor, locomotion, delta_seconds);
        }
    }
}

fn step_actor(actor: &mut Actor, locomotion: &mut Locomotion, delta_seconds: f32) {
    if actor.current_floor != actor.target_floor {
        locomotion.floor_progress += locomotion.floor_speed * delta_seconds;
        while locomotion.floor_progress >= 1.0 && actor.current_floor != actor.target_floor {
            actor.current_floor += (actor.target_floor - actor.current_floor).signum();
            locomotion.floor_progress -= 1.0;
        }
        if actor.current_floor != actor.target_floor {
            return;
        }
        locomotion.floor_progress = 0.0;
    }

    let remaining = actor.target_column - actor.current_column;
    let step = locomotion.walk_speed * delta_seconds;
    if remaining.abs() <= step {
        actor.current_column = actor.target_column;
        actor.motion = MotionState::AtDestination;
    } else {
        actor.current_column += step * remaining.signum();
    }
}
