//! Step Scheduler
//!
//! Runs one tick: every kind in a fixed order, every agent of a kind in
//! registration order. Each kind walks a roster captured when its turn
//! starts; agents removed earlier in the tick are skipped.

use bevy_ecs::prelude::*;

use waste_events::{AgentKind, SimEvent};

use crate::systems::{run_behavior, spatial, TickContext};

/// Kind order within a tick
pub const TICK_ORDER: [AgentKind; 6] = [
    AgentKind::ImproperDisposer,
    AgentKind::Normal,
    AgentKind::ProperDisposer,
    AgentKind::Police,
    AgentKind::Collector,
    AgentKind::Camera,
];

/// Executes ticks against a world. Lifecycle gating is done by the caller.
#[derive(Debug, Clone)]
pub struct StepScheduler {
    order: [AgentKind; 6],
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self { order: TICK_ORDER }
    }
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(&self) -> &[AgentKind] {
        &self.order
    }

    /// Run every behavior once and return the events in the order they
    /// happened
    pub fn run_tick(&self, world: &mut World, tick: u64) -> Vec<SimEvent> {
        let mut ctx = TickContext::new(tick);
        for kind in self.order {
            let roster = spatial::agents_of_kind(world, kind);
            for entity in roster {
                if !spatial::is_alive(world, entity) {
                    continue;
                }
                run_behavior(world, entity, kind, &mut ctx);
            }
        }
        ctx.events
    }
}
