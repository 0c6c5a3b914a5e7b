//! Enforcement Behaviors
//!
//! Police remove non-compliant agents from their cell; cameras log
//! low-score agents in range onto the shared blackboard.

use bevy_ecs::prelude::*;

use waste_events::{AgentKind, SimEvent};

use super::TickContext;
use crate::components::{Blackboard, Detection, Position, Score};
use crate::config::{PoliceTarget, RuleConfig};
use crate::systems::spatial;

/// Police: remove every agent of the configured target set sharing the
/// officer's cell
pub fn police(world: &mut World, entity: Entity, ctx: &mut TickContext) {
    let Some(position) = world.get::<Position>(entity).copied() else {
        return;
    };
    let target = world.resource::<RuleConfig>().police_target;

    let (target_kind, suspects) = match target {
        PoliceTarget::ImproperDisposer => (
            AgentKind::ImproperDisposer,
            spatial::agents_of_kind_at(world, AgentKind::ImproperDisposer, position),
        ),
        PoliceTarget::LowScoreNormal => {
            let suspects: Vec<Entity> = spatial::agents_of_kind_at(world, AgentKind::Normal, position)
                .into_iter()
                .filter(|suspect| world.get::<Score>(*suspect).is_some_and(|s| s.0 <= 0))
                .collect();
            (AgentKind::Normal, suspects)
        }
    };
    if suspects.is_empty() {
        return;
    }

    for suspect in &suspects {
        world.despawn(*suspect);
    }
    ctx.emit(SimEvent::arrest(
        ctx.tick,
        position.cell(),
        target_kind,
        suspects.len() as u32,
    ));
}

/// Camera: append every low-score Normal agent within the detection
/// radius to the blackboard. Nobody is removed.
pub fn camera(world: &mut World, entity: Entity, ctx: &mut TickContext) {
    let Some(position) = world.get::<Position>(entity).copied() else {
        return;
    };
    let radius = world.resource::<RuleConfig>().detection_radius;

    let spotted = spatial::low_score_normals_within(world, position, radius);
    if spotted.is_empty() {
        return;
    }

    let count = spotted.len() as u32;
    let tick = ctx.tick;
    world
        .resource_mut::<Blackboard>()
        .extend(spotted.into_iter().map(|(agent, cell, score)| Detection {
            tick,
            camera: position.cell(),
            agent,
            agent_cell: cell.cell(),
            score,
        }));
    ctx.emit(SimEvent::detection(tick, position.cell(), count));
}
