//! Disposal Behaviors
//!
//! Normal agents may dispose of waste off the lattice and get penalized;
//! ImproperDisposers drop garbage every tick.

use bevy_ecs::prelude::*;
use rand::Rng;

use waste_events::SimEvent;

use super::TickContext;
use crate::components::{Position, Score};
use crate::config::RuleConfig;
use crate::setup::spawn_garbage;
use crate::systems::spatial;
use crate::SimRng;

/// Normal agent: for each garbage item on its cell, roll the disposal
/// chance; the first roll that hits off the lattice costs one point and
/// counts as a penalty.
pub fn normal(world: &mut World, entity: Entity, ctx: &mut TickContext) {
    let Some(position) = world.get::<Position>(entity).copied() else {
        return;
    };
    let chance = world.resource::<RuleConfig>().improper_disposal_chance;

    for _item in spatial::garbage_at(world, position) {
        let roll: f64 = world.resource_mut::<SimRng>().0.gen();
        if roll < chance && !spatial::is_disposal_area(world, position) {
            if let Some(mut score) = world.get_mut::<Score>(entity) {
                score.0 -= 1;
            }
            ctx.emit(SimEvent::penalty(ctx.tick, position.cell()));
            return;
        }
    }
}

/// ImproperDisposer: drop a new garbage item on the current cell
pub fn improper_disposer(world: &mut World, entity: Entity, ctx: &mut TickContext) {
    let Some(position) = world.get::<Position>(entity).copied() else {
        return;
    };
    spawn_garbage(world, position);
    ctx.emit(SimEvent::disposal(ctx.tick, position.cell()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::setup::{init_world, spawn_agent};
    use waste_events::{AgentKind, EventType};

    fn world_with_chance(chance: f64) -> World {
        let mut config = SimConfig::default();
        config.rules.improper_disposal_chance = chance;
        let mut world = World::new();
        init_world(&mut world, &config);
        world
    }

    #[test]
    fn test_improper_disposer_drops_on_its_cell() {
        let mut world = world_with_chance(0.5);
        let agent = spawn_agent(&mut world, AgentKind::ImproperDisposer, Position::new(7, 8));
        let mut ctx = TickContext::new(1);

        improper_disposer(&mut world, agent, &mut ctx);
        improper_disposer(&mut world, agent, &mut ctx);

        assert_eq!(spatial::garbage_at(&mut world, Position::new(7, 8)).len(), 2);
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[0].event_type, EventType::Disposal);
    }

    #[test]
    fn test_normal_penalized_off_lattice() {
        let mut world = world_with_chance(1.0);
        let agent = spawn_agent(&mut world, AgentKind::Normal, Position::new(7, 8));
        spawn_garbage(&mut world, Position::new(7, 8));
        spawn_garbage(&mut world, Position::new(7, 8));
        let mut ctx = TickContext::new(1);

        normal(&mut world, agent, &mut ctx);

        // One penalty per tick no matter how much garbage is on the cell
        assert_eq!(world.get::<Score>(agent), Some(&Score(4)));
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].arrests(), 1);
    }

    #[test]
    fn test_normal_not_penalized_on_disposal_area() {
        let mut world = world_with_chance(1.0);
        world.spawn((crate::components::DisposalArea, Position::new(10, 10)));
        let agent = spawn_agent(&mut world, AgentKind::Normal, Position::new(10, 10));
        spawn_garbage(&mut world, Position::new(10, 10));
        let mut ctx = TickContext::new(1);

        normal(&mut world, agent, &mut ctx);

        assert_eq!(world.get::<Score>(agent), Some(&Score(5)));
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn test_normal_never_penalized_at_zero_chance() {
        let mut world = world_with_chance(0.0);
        let agent = spawn_agent(&mut world, AgentKind::Normal, Position::new(3, 3));
        spawn_garbage(&mut world, Position::new(3, 3));
        let mut ctx = TickContext::new(1);

        for _ in 0..50 {
            normal(&mut world, agent, &mut ctx);
        }
        assert_eq!(world.get::<Score>(agent), Some(&Score(5)));
    }

    #[test]
    fn test_normal_without_garbage_does_nothing() {
        let mut world = world_with_chance(1.0);
        let agent = spawn_agent(&mut world, AgentKind::Normal, Position::new(3, 3));
        let mut ctx = TickContext::new(1);
        normal(&mut world, agent, &mut ctx);
        assert!(ctx.events.is_empty());
    }
}
