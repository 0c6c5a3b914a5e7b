//! Spatial Queries
//!
//! Read-only lookups over the world: entities of a kind, entities at a
//! cell, nearest garbage. Results always come back in registration order.

use bevy_ecs::prelude::*;

use waste_events::AgentKind;

use crate::components::{Agent, DisposalArea, Garbage, Position, Score, SpawnOrder};

/// Whether the entity still exists
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_some()
}

/// Live agents of one kind, in registration order
pub fn agents_of_kind(world: &mut World, kind: AgentKind) -> Vec<Entity> {
    let mut query = world.query::<(Entity, &Agent, &SpawnOrder)>();
    let mut found: Vec<(SpawnOrder, Entity)> = query
        .iter(world)
        .filter(|(_, agent, _)| agent.kind == kind)
        .map(|(entity, _, order)| (*order, entity))
        .collect();
    found.sort_unstable_by_key(|(order, _)| *order);
    found.into_iter().map(|(_, entity)| entity).collect()
}

/// Live agents of one kind standing on `cell`, in registration order
pub fn agents_of_kind_at(world: &mut World, kind: AgentKind, cell: Position) -> Vec<Entity> {
    let mut query = world.query::<(Entity, &Agent, &Position, &SpawnOrder)>();
    let mut found: Vec<(SpawnOrder, Entity)> = query
        .iter(world)
        .filter(|(_, agent, position, _)| agent.kind == kind && **position == cell)
        .map(|(entity, _, _, order)| (*order, entity))
        .collect();
    found.sort_unstable_by_key(|(order, _)| *order);
    found.into_iter().map(|(_, entity)| entity).collect()
}

/// Garbage items on `cell`, in registration order
pub fn garbage_at(world: &mut World, cell: Position) -> Vec<Entity> {
    let mut query = world.query_filtered::<(Entity, &Position, &SpawnOrder), With<Garbage>>();
    let mut found: Vec<(SpawnOrder, Entity)> = query
        .iter(world)
        .filter(|(_, position, _)| **position == cell)
        .map(|(entity, _, order)| (*order, entity))
        .collect();
    found.sort_unstable_by_key(|(order, _)| *order);
    found.into_iter().map(|(_, entity)| entity).collect()
}

/// Every garbage item with its cell, in registration order
pub fn garbage_items(world: &mut World) -> Vec<(Entity, Position)> {
    let mut query = world.query_filtered::<(Entity, &Position, &SpawnOrder), With<Garbage>>();
    let mut found: Vec<(SpawnOrder, Entity, Position)> = query
        .iter(world)
        .map(|(entity, position, order)| (*order, entity, *position))
        .collect();
    found.sort_unstable_by_key(|(order, _, _)| *order);
    found.into_iter().map(|(_, entity, position)| (entity, position)).collect()
}

pub fn garbage_count(world: &mut World) -> usize {
    world.query_filtered::<(), With<Garbage>>().iter(world).count()
}

/// Euclidean-nearest garbage item to `from`. Ties go to the item
/// registered first.
pub fn nearest_garbage(world: &mut World, from: Position) -> Option<Entity> {
    let mut best: Option<(i64, Entity)> = None;
    for (entity, position) in garbage_items(world) {
        let dist = from.distance_sq(&position);
        match best {
            Some((best_dist, _)) if dist >= best_dist => {}
            _ => best = Some((dist, entity)),
        }
    }
    best.map(|(_, entity)| entity)
}

/// Disposal-area cells in lattice order
pub fn disposal_areas(world: &mut World) -> Vec<Position> {
    world
        .query_filtered::<&Position, With<DisposalArea>>()
        .iter(world)
        .copied()
        .collect()
}

pub fn is_disposal_area(world: &mut World, cell: Position) -> bool {
    world
        .query_filtered::<&Position, With<DisposalArea>>()
        .iter(world)
        .any(|position| *position == cell)
}

/// Normal agents within `radius` (Euclidean, inclusive) of `center`
/// whose score is at or below zero, in registration order
pub fn low_score_normals_within(world: &mut World, center: Position, radius: f64) -> Vec<(Entity, Position, i32)> {
    let radius_sq = radius * radius;
    let mut query = world.query::<(Entity, &Agent, &Position, &Score, &SpawnOrder)>();
    let mut found: Vec<(SpawnOrder, Entity, Position, i32)> = query
        .iter(world)
        .filter(|(_, agent, position, score, _)| {
            agent.kind == AgentKind::Normal
                && score.0 <= 0
                && (center.distance_sq(position) as f64) <= radius_sq
        })
        .map(|(entity, _, position, score, order)| (*order, entity, *position, score.0))
        .collect();
    found.sort_unstable_by_key(|(order, _, _, _)| *order);
    found
        .into_iter()
        .map(|(_, entity, position, score)| (entity, position, score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::setup::{init_world, spawn_agent, spawn_garbage};

    fn test_world() -> World {
        let mut world = World::new();
        init_world(&mut world, &SimConfig::default());
        world
    }

    #[test]
    fn test_agents_of_kind_in_registration_order() {
        let mut world = test_world();
        let a = spawn_agent(&mut world, AgentKind::Police, Position::new(5, 5));
        spawn_agent(&mut world, AgentKind::Normal, Position::new(1, 1));
        let b = spawn_agent(&mut world, AgentKind::Police, Position::new(0, 0));
        assert_eq!(agents_of_kind(&mut world, AgentKind::Police), vec![a, b]);
    }

    #[test]
    fn test_agents_of_kind_at_matches_exact_cell() {
        let mut world = test_world();
        let here = spawn_agent(&mut world, AgentKind::ImproperDisposer, Position::new(4, 4));
        spawn_agent(&mut world, AgentKind::ImproperDisposer, Position::new(4, 5));
        spawn_agent(&mut world, AgentKind::Normal, Position::new(4, 4));
        assert_eq!(
            agents_of_kind_at(&mut world, AgentKind::ImproperDisposer, Position::new(4, 4)),
            vec![here]
        );
    }

    #[test]
    fn test_nearest_garbage_prefers_first_on_tie() {
        let mut world = test_world();
        let first = spawn_garbage(&mut world, Position::new(12, 10));
        let _tied = spawn_garbage(&mut world, Position::new(8, 10));
        let _far = spawn_garbage(&mut world, Position::new(30, 30));
        assert_eq!(nearest_garbage(&mut world, Position::new(10, 10)), Some(first));
    }

    #[test]
    fn test_nearest_garbage_uses_euclidean_distance() {
        let mut world = test_world();
        // Chebyshev distance 3 for both, Euclidean favours the straight one
        spawn_garbage(&mut world, Position::new(3, 3));
        let straight = spawn_garbage(&mut world, Position::new(3, 0));
        assert_eq!(nearest_garbage(&mut world, Position::new(0, 0)), Some(straight));
    }

    #[test]
    fn test_nearest_garbage_empty() {
        let mut world = test_world();
        assert_eq!(nearest_garbage(&mut world, Position::new(0, 0)), None);
    }

    #[test]
    fn test_low_score_normals_within_radius() {
        let mut world = test_world();
        let inside = spawn_agent(&mut world, AgentKind::Normal, Position::new(13, 14));
        spawn_agent(&mut world, AgentKind::Normal, Position::new(10, 11));
        let outside = spawn_agent(&mut world, AgentKind::Normal, Position::new(16, 10));
        for entity in [inside, outside] {
            world.get_mut::<Score>(entity).unwrap().0 = 0;
        }

        let found = low_score_normals_within(&mut world, Position::new(10, 10), 5.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, inside);
    }
}
