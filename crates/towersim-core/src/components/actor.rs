//! Actor identity and locomotion components shared by visitors and employees.

use serde::{Deserialize, Serialize};

/// Floor every actor enters on, leaves from, and waits on while job hunting
pub const GROUND_FLOOR: i32 = 0;

/// Motion state of an actor. Owned by the movement system except for
/// [`Actor::set_destination`], which flips it to `Moving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Idle,
    Moving,
    AtDestination,
}

/// Which role an actor currently plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Visitor,
    Employee,
}

/// Identity record carried by every actor in the tower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub current_floor: i32,
    pub current_column: f32,
    pub target_floor: i32,
    pub target_column: f32,
    pub motion: MotionState,
    pub kind: NpcKind,
    /// Free-form text for display
    pub status: String,
}

impl Actor {
    /// New actor standing still at the given spot, with no destination
    pub fn new(name: impl Into<String>, kind: NpcKind, floor: i32, column: f32) -> Self {
        Self {
            name: name.into(),
            current_floor: floor,
            current_column: column,
            target_floor: floor,
            target_column: column,
            motion: MotionState::Idle,
            kind,
            status: String::new(),
        }
    }

    /// Request movement toward a floor/column. The movement system does the rest.
    pub fn set_destination(&mut self, floor: i32, column: f32, label: impl Into<String>) {
        self.target_floor = floor;
        self.target_column = column;
        self.motion = MotionState::Moving;
        self.status = label.into();
    }

    pub fn is_at_destination(&self) -> bool {
        self.motion == MotionState::AtDestination
    }

    pub fn is_visitor(&self) -> bool {
        self.kind == NpcKind::Visitor
    }
}

/// Movement parameters and in-flight state, read only by the movement system
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Locomotion {
    /// Horizontal speed in columns per second
    pub walk_speed: f32,
    /// Vertical speed in floors per second
    pub floor_speed: f32,
    /// Fractional progress toward the next floor
    pub floor_progress: f32,
}

impl Locomotion {
    pub fn new(walk_speed: f32, floor_speed: f32) -> Self {
        Self {
            walk_speed,
            floor_speed,
            floor_progress: 0.0,
        }
    }
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new(4.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor_is_idle_in_place() {
        let actor = Actor::new("Visitor 1", NpcKind::Visitor, 0, 2.0);
        assert_eq!(actor.motion, MotionState::Idle);
        assert_eq!(actor.target_floor, 0);
        assert_eq!(actor.target_column, 2.0);
        assert!(actor.is_visitor());
    }

    #[test]
    fn test_set_destination() {
        let mut actor = Actor::new("Visitor 1", NpcKind::Visitor, 0, 0.0);
        actor.set_destination(3, 12.5, "Heading to Restaurant");

        assert_eq!(actor.motion, MotionState::Moving);
        assert_eq!(actor.target_floor, 3);
        assert_eq!(actor.target_column, 12.5);
        assert_eq!(actor.status, "Heading to Restaurant");
        assert!(!actor.is_at_destination());
    }
}
