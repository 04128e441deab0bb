//! Needs system - grows visitor needs over time

use crate::components::{NeedKind, Needs};
use hecs::World;

/// Grow every actor's needs by `elapsed_seconds`. Run at a fixed cadence, not per frame.
pub fn needs_system(world: &mut World, elapsed_seconds: f32) {
    for (_, needs) in world.query_mut::<&mut Needs>() {
        needs.grow(elapsed_seconds);
    }
}

/// Find actors whose highest need is above the threshold
pub fn find_urgent_needs(world: &World, threshold: f32) -> Vec<(hecs::Entity, NeedKind)> {
    world
        .query::<&Needs>()
        .iter()
        .filter_map(|(entity, needs)| {
            let (kind, level) = needs.highest();
            (level > threshold).then_some((entity, kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Archetype;

    #[test]
    fn test_needs_grow() {
        let mut world = World::new();
        let entity = world.spawn((Needs::new(Archetype::Casual),));

        needs_system(&mut world, 50.0);

        let needs = world.get::<&Needs>(entity).unwrap();
        assert!((needs.hunger - 40.0).abs() < 1e-3);
        assert!((needs.comfort - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_find_urgent_needs() {
        let mut world = World::new();
        let mut hungry = Needs::new(Archetype::Casual);
        hungry.hunger = 90.0;
        let entity = world.spawn((hungry,));
        world.spawn((Needs::new(Archetype::Tourist),));

        assert_eq!(find_urgent_needs(&world, 60.0), vec![(entity, NeedKind::Hunger)]);
    }
}
