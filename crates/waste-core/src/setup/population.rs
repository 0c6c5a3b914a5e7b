//! Population Setup
//!
//! Inserts the world resources and places agents, garbage and the
//! disposal-area lattice.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use waste_events::{AgentKind, PopulationCounts};

use crate::components::{
    Agent, Blackboard, DisposalArea, Garbage, GridBounds, Position, Score, SpawnSequence, Target,
};
use crate::config::SimConfig;
use crate::SimRng;

/// Order in which kinds are placed by `populate`
pub const SPAWN_ORDER: [AgentKind; 6] = [
    AgentKind::Normal,
    AgentKind::ImproperDisposer,
    AgentKind::ProperDisposer,
    AgentKind::Police,
    AgentKind::Collector,
    AgentKind::Camera,
];

/// Insert every resource the behaviors read. The random source is seeded
/// here and nowhere else.
pub fn init_world(world: &mut World, config: &SimConfig) {
    world.insert_resource(GridBounds::new(
        config.grid.grid_width,
        config.grid.grid_height,
        config.grid.bounds_policy,
    ));
    world.insert_resource(config.rules.clone());
    world.insert_resource(SimRng(SmallRng::seed_from_u64(config.seed)));
    world.insert_resource(SpawnSequence::new());
    world.insert_resource(Blackboard::new());
}

/// Despawn every agent, garbage item and disposal area
pub fn clear_entities(world: &mut World) {
    let mut query = world.query_filtered::<Entity, Or<(With<Agent>, With<Garbage>, With<DisposalArea>)>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    for entity in entities {
        world.despawn(entity);
    }
}

/// Clear the world and place the configured population at random cells.
///
/// Safe to call repeatedly; each call starts from an empty world. Returns
/// the counts actually placed.
pub fn populate(world: &mut World, counts: &PopulationCounts, disposal_spacing: u32) -> PopulationCounts {
    clear_entities(world);
    world.resource_mut::<SpawnSequence>().reset();
    world.resource_mut::<Blackboard>().clear();

    let mut placed = PopulationCounts::empty();
    for kind in SPAWN_ORDER {
        for _ in 0..counts.count_for(kind) {
            let cell = random_cell(world);
            spawn_agent(world, kind, cell);
        }
        placed.set_count(kind, counts.count_for(kind));
    }

    for _ in 0..counts.garbage_count {
        let cell = random_cell(world);
        spawn_garbage(world, cell);
    }
    placed.garbage_count = counts.garbage_count;

    let lattice = world.resource::<GridBounds>().lattice(disposal_spacing);
    for cell in lattice {
        world.spawn((DisposalArea, cell));
    }

    placed
}

/// Uniformly random cell on the grid
pub fn random_cell(world: &mut World) -> Position {
    let bounds = *world.resource::<GridBounds>();
    let mut rng = world.resource_mut::<SimRng>();
    let x = rng.0.gen_range(0..bounds.width);
    let y = rng.0.gen_range(0..bounds.height);
    Position::new(x, y)
}

/// Spawn an agent with its kind's starting state
pub fn spawn_agent(world: &mut World, kind: AgentKind, position: Position) -> Entity {
    let order = world.resource_mut::<SpawnSequence>().issue();
    let mut entity = world.spawn((Agent::new(kind), position, order));
    if let Some(score) = kind.default_score() {
        entity.insert(Score(score));
    }
    if kind == AgentKind::Collector {
        entity.insert(Target::default());
    }
    entity.id()
}

/// Spawn a garbage item
pub fn spawn_garbage(world: &mut World, position: Position) -> Entity {
    let order = world.resource_mut::<SpawnSequence>().issue();
    world.spawn((Garbage, position, order)).id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::spatial;

    fn test_world() -> World {
        let mut world = World::new();
        init_world(&mut world, &SimConfig::default());
        world
    }

    #[test]
    fn test_populate_places_configured_counts() {
        let mut world = test_world();
        let counts = PopulationCounts::default();
        let placed = populate(&mut world, &counts, 10);
        assert_eq!(placed, counts);

        for kind in AgentKind::all() {
            assert_eq!(spatial::agents_of_kind(&mut world, *kind).len(), counts.count_for(*kind));
        }
        assert_eq!(spatial::garbage_count(&mut world), counts.garbage_count);
        // 100x60 grid, lattice every 10 lines: 10 columns x 6 rows
        assert_eq!(spatial::disposal_areas(&mut world).len(), 60);
    }

    #[test]
    fn test_populate_is_repeatable() {
        let mut world = test_world();
        let counts = PopulationCounts::default();
        populate(&mut world, &counts, 10);
        populate(&mut world, &counts, 10);
        assert_eq!(
            spatial::agents_of_kind(&mut world, AgentKind::Normal).len(),
            counts.normal_count
        );
        assert_eq!(spatial::disposal_areas(&mut world).len(), 60);
    }

    #[test]
    fn test_spawned_agents_carry_kind_state() {
        let mut world = test_world();
        let normal = spawn_agent(&mut world, AgentKind::Normal, Position::new(1, 1));
        let collector = spawn_agent(&mut world, AgentKind::Collector, Position::new(2, 2));
        let police = spawn_agent(&mut world, AgentKind::Police, Position::new(3, 3));

        assert_eq!(world.get::<Score>(normal), Some(&Score(5)));
        assert_eq!(world.get::<Target>(collector), Some(&Target(None)));
        assert!(world.get::<Score>(police).is_none());
    }

    #[test]
    fn test_random_cells_in_bounds() {
        let mut world = test_world();
        let bounds = *world.resource::<GridBounds>();
        for _ in 0..500 {
            let cell = random_cell(&mut world);
            assert!(bounds.contains(cell.x as i64, cell.y as i64));
        }
    }
}
