//! Snapshot Builder
//!
//! Reads the world into a `WorldSnapshot`. Never mutates simulation state.

use bevy_ecs::prelude::*;

use waste_events::{
    AgentKind, EntitySnapshot, KindGroup, SimulationState, WorldSnapshot, DISPOSAL_AREA_COLOR,
    GARBAGE_COLOR,
};

use crate::components::{Blackboard, GridBounds, Position, Score};
use crate::systems::spatial;

/// Capture the current world. Groups follow `AgentKind::all()`, members
/// and garbage follow registration order.
pub fn build_snapshot(world: &mut World, tick: u64, state: SimulationState, arrest_count: u64) -> WorldSnapshot {
    let bounds = *world.resource::<GridBounds>();

    let mut agents = Vec::with_capacity(AgentKind::all().len());
    for &kind in AgentKind::all() {
        let members = spatial::agents_of_kind(world, kind)
            .into_iter()
            .filter_map(|entity| {
                let pos = world.get::<Position>(entity)?;
                let score = world.get::<Score>(entity).map(|s| s.0);
                Some(EntitySnapshot {
                    x: pos.x,
                    y: pos.y,
                    score,
                })
            })
            .collect();
        agents.push(KindGroup {
            kind,
            color: kind.color(),
            members,
        });
    }

    let garbage = spatial::garbage_items(world)
        .into_iter()
        .map(|(_, pos)| pos.cell())
        .collect();
    let disposal_areas = spatial::disposal_areas(world)
        .into_iter()
        .map(|pos| pos.cell())
        .collect();
    let detections = world.resource::<Blackboard>().len();

    WorldSnapshot {
        tick,
        state,
        arrest_count,
        width: bounds.width,
        height: bounds.height,
        agents,
        garbage,
        garbage_color: GARBAGE_COLOR,
        disposal_areas,
        disposal_area_color: DISPOSAL_AREA_COLOR,
        detections,
    }
}
