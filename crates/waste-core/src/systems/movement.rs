//! Movement
//!
//! Every position change goes through `move_agent`, which applies the
//! grid's bounds policy.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::{GridBounds, Position};
use crate::SimRng;

/// Random unit step, each axis uniform over {-1, 0, 1}
pub fn random_unit_step(world: &mut World) -> (i64, i64) {
    let mut rng = world.resource_mut::<SimRng>();
    let dx = rng.0.gen_range(-1..=1);
    let dy = rng.0.gen_range(-1..=1);
    (dx, dy)
}

/// Move an entity by `(dx, dy)` under the bounds policy. Returns the new
/// cell, or `None` if the entity has no position.
pub fn move_agent(world: &mut World, entity: Entity, dx: i64, dy: i64) -> Option<Position> {
    let bounds = *world.resource::<GridBounds>();
    let mut position = world.get_mut::<Position>(entity)?;
    let next = bounds.offset(*position, dx, dy);
    *position = next;
    Some(next)
}

/// Take one random unit step
pub fn wander(world: &mut World, entity: Entity) -> Option<Position> {
    let (dx, dy) = random_unit_step(world);
    move_agent(world, entity, dx, dy)
}

/// Per-axis sign of the delta from `from` to `to`
pub fn step_toward(from: Position, to: Position) -> (i64, i64) {
    let dx = (to.x as i64 - from.x as i64).signum();
    let dy = (to.y as i64 - from.y as i64).signum();
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::setup::{init_world, spawn_agent};
    use waste_events::AgentKind;

    #[test]
    fn test_step_toward_is_diagonal() {
        assert_eq!(step_toward(Position::new(0, 0), Position::new(5, 2)), (1, 1));
        assert_eq!(step_toward(Position::new(5, 5), Position::new(5, 0)), (0, -1));
        assert_eq!(step_toward(Position::new(3, 3), Position::new(3, 3)), (0, 0));
    }

    #[test]
    fn test_move_agent_clamps_at_corner() {
        let mut world = World::new();
        init_world(&mut world, &SimConfig::default());
        let agent = spawn_agent(&mut world, AgentKind::Normal, Position::new(0, 0));
        assert_eq!(move_agent(&mut world, agent, -1, -1), Some(Position::new(0, 0)));
        assert_eq!(world.get::<Position>(agent), Some(&Position::new(0, 0)));
    }

    #[test]
    fn test_wander_moves_at_most_one_cell() {
        let mut world = World::new();
        init_world(&mut world, &SimConfig::default());
        let agent = spawn_agent(&mut world, AgentKind::Normal, Position::new(50, 30));
        for _ in 0..100 {
            let before = *world.get::<Position>(agent).unwrap();
            let after = wander(&mut world, agent).unwrap();
            assert!((before.x as i64 - after.x as i64).abs() <= 1);
            assert!((before.y as i64 - after.y as i64).abs() <= 1);
        }
    }
}
