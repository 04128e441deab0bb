//! Satisfaction system - eases each visitor's score toward what their needs imply

use crate::components::{Needs, Satisfaction, MAX_LEVEL};
use crate::config::SimConfig;
use hecs::World;

/// Smooth satisfaction toward `100 - average need`. Run every couple of seconds.
pub fn satisfaction_system(world: &mut World, config: &SimConfig) {
    for (_, (needs, satisfaction)) in world.query_mut::<(&Needs, &mut Satisfaction)>() {
        update_satisfaction(satisfaction, needs, config);
    }
}

pub fn update_satisfaction(satisfaction: &mut Satisfaction, needs: &Needs, config: &SimConfig) {
    let target = MAX_LEVEL - needs.average();
    satisfaction.approach(target, config.satisfaction_smoothing);

    // Sticky until something else clears it
    if needs.highest_value() > config.penalty_threshold {
        satisfaction.wait_time_penalty = config.wait_time_penalty;
    }
}
