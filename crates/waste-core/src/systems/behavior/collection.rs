//! Collection Behaviors
//!
//! ProperDisposers pick up garbage they walk over; Collectors pursue the
//! nearest item and remove it on arrival.

use bevy_ecs::prelude::*;

use waste_events::SimEvent;

use super::{remove_garbage, TickContext};
use crate::components::{Position, Score, Target};
use crate::systems::{movement, spatial};

/// ProperDisposer: remove one garbage item from the current cell
pub fn proper_disposer(world: &mut World, entity: Entity, ctx: &mut TickContext) {
    let Some(position) = world.get::<Position>(entity).copied() else {
        return;
    };
    let Some(item) = spatial::garbage_at(world, position).first().copied() else {
        return;
    };
    remove_garbage(world, item);
    if let Some(mut score) = world.get_mut::<Score>(entity) {
        score.0 += 1;
    }
    ctx.emit(SimEvent::collection(ctx.tick, position.cell()));
}

/// Collector: keep or pick a target, step toward it, remove it on arrival.
/// Idle when there is no garbage at all.
pub fn collector(world: &mut World, entity: Entity, ctx: &mut TickContext) {
    let Some(position) = world.get::<Position>(entity).copied() else {
        return;
    };

    let current = world.get::<Target>(entity).and_then(|target| target.0);
    let goal = match current.and_then(|item| locate(world, item)) {
        Some(found) => Some(found),
        None => spatial::nearest_garbage(world, position).and_then(|item| locate(world, item)),
    };
    if let Some(mut target) = world.get_mut::<Target>(entity) {
        target.0 = goal.map(|(item, _)| item);
    }
    let Some((item, goal_cell)) = goal else {
        return;
    };

    let (dx, dy) = movement::step_toward(position, goal_cell);
    let arrived = movement::move_agent(world, entity, dx, dy).unwrap_or(position);
    if arrived == goal_cell {
        remove_garbage(world, item);
        ctx.emit(SimEvent::removal(ctx.tick, arrived.cell()));
    }
}

fn locate(world: &World, item: Entity) -> Option<(Entity, Position)> {
    world.get::<Position>(item).map(|position| (item, *position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::setup::{init_world, spawn_agent, spawn_garbage};
    use waste_events::{AgentKind, EventType};

    fn test_world() -> World {
        let mut world = World::new();
        init_world(&mut world, &SimConfig::default());
        world
    }

    #[test]
    fn test_proper_disposer_takes_one_item() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::ProperDisposer, Position::new(2, 2));
        spawn_garbage(&mut world, Position::new(2, 2));
        spawn_garbage(&mut world, Position::new(2, 2));
        let mut ctx = TickContext::new(1);

        proper_disposer(&mut world, agent, &mut ctx);

        assert_eq!(spatial::garbage_count(&mut world), 1);
        assert_eq!(world.get::<Score>(agent), Some(&Score(1)));
        assert_eq!(ctx.events[0].event_type, EventType::Collection);
    }

    #[test]
    fn test_proper_disposer_ignores_other_cells() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::ProperDisposer, Position::new(2, 2));
        spawn_garbage(&mut world, Position::new(2, 3));
        let mut ctx = TickContext::new(1);

        proper_disposer(&mut world, agent, &mut ctx);

        assert_eq!(spatial::garbage_count(&mut world), 1);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn test_collector_steps_diagonally_toward_target() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::Collector, Position::new(0, 0));
        let item = spawn_garbage(&mut world, Position::new(5, 2));
        let mut ctx = TickContext::new(1);

        collector(&mut world, agent, &mut ctx);

        assert_eq!(world.get::<Position>(agent), Some(&Position::new(1, 1)));
        assert_eq!(world.get::<Target>(agent), Some(&Target(Some(item))));
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn test_collector_keeps_target_when_closer_item_appears() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::Collector, Position::new(0, 0));
        let first = spawn_garbage(&mut world, Position::new(6, 6));
        let mut ctx = TickContext::new(1);
        collector(&mut world, agent, &mut ctx);

        spawn_garbage(&mut world, Position::new(1, 0));
        collector(&mut world, agent, &mut ctx);

        assert_eq!(world.get::<Target>(agent), Some(&Target(Some(first))));
        assert_eq!(world.get::<Position>(agent), Some(&Position::new(2, 2)));
    }

    #[test]
    fn test_collector_removes_on_arrival() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::Collector, Position::new(4, 4));
        spawn_garbage(&mut world, Position::new(5, 5));
        let mut ctx = TickContext::new(3);

        collector(&mut world, agent, &mut ctx);

        assert_eq!(spatial::garbage_count(&mut world), 0);
        assert_eq!(world.get::<Target>(agent), Some(&Target(None)));
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].event_type, EventType::Removal);
        assert_eq!(ctx.events[0].tick, 3);
    }

    #[test]
    fn test_collector_retargets_after_target_taken() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::Collector, Position::new(0, 0));
        let near = spawn_garbage(&mut world, Position::new(3, 0));
        let far = spawn_garbage(&mut world, Position::new(0, 9));
        let mut ctx = TickContext::new(1);
        collector(&mut world, agent, &mut ctx);
        assert_eq!(world.get::<Target>(agent), Some(&Target(Some(near))));

        remove_garbage(&mut world, near);
        assert_eq!(world.get::<Target>(agent), Some(&Target(None)));

        collector(&mut world, agent, &mut ctx);
        assert_eq!(world.get::<Target>(agent), Some(&Target(Some(far))));
    }

    #[test]
    fn test_collector_idle_without_garbage() {
        let mut world = test_world();
        let agent = spawn_agent(&mut world, AgentKind::Collector, Position::new(4, 4));
        let mut ctx = TickContext::new(1);

        collector(&mut world, agent, &mut ctx);

        assert_eq!(world.get::<Position>(agent), Some(&Position::new(4, 4)));
        assert!(ctx.events.is_empty());
    }
}
