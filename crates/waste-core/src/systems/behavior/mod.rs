//! Behavior Table
//!
//! One behavior per agent kind, looked up by kind. A behavior is a
//! capability set plus an `act` function that reads and writes the world
//! for a single agent. Movable kinds take a random unit step before acting.

use bevy_ecs::prelude::*;

use waste_events::{AgentKind, SimEvent};

use crate::components::{Garbage, Target};
use crate::systems::movement;

pub mod collection;
pub mod disposal;
pub mod enforcement;

/// Signature shared by every behavior
pub type BehaviorFn = fn(&mut World, Entity, &mut TickContext);

/// What a kind is able to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Takes a random unit step every tick
    pub movable: bool,
    /// Puts garbage into the world, properly or not
    pub disposes: bool,
    /// Takes garbage out of the world
    pub collects: bool,
    /// Removes other agents
    pub arrests: bool,
    /// Observes other agents without touching them
    pub detects: bool,
}

impl Capabilities {
    const NONE: Capabilities = Capabilities {
        movable: false,
        disposes: false,
        collects: false,
        arrests: false,
        detects: false,
    };
}

/// A table entry
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub kind: AgentKind,
    pub capabilities: Capabilities,
    pub act: BehaviorFn,
}

/// The behavior table, one entry per kind
pub const BEHAVIORS: [Behavior; 6] = [
    Behavior {
        kind: AgentKind::Normal,
        capabilities: Capabilities {
            movable: true,
            disposes: true,
            ..Capabilities::NONE
        },
        act: disposal::normal,
    },
    Behavior {
        kind: AgentKind::ProperDisposer,
        capabilities: Capabilities {
            movable: true,
            collects: true,
            ..Capabilities::NONE
        },
        act: collection::proper_disposer,
    },
    Behavior {
        kind: AgentKind::ImproperDisposer,
        capabilities: Capabilities {
            movable: true,
            disposes: true,
            ..Capabilities::NONE
        },
        act: disposal::improper_disposer,
    },
    Behavior {
        kind: AgentKind::Police,
        capabilities: Capabilities {
            movable: true,
            arrests: true,
            ..Capabilities::NONE
        },
        act: enforcement::police,
    },
    // Collectors move by pursuit inside their own behavior
    Behavior {
        kind: AgentKind::Collector,
        capabilities: Capabilities {
            collects: true,
            ..Capabilities::NONE
        },
        act: collection::collector,
    },
    Behavior {
        kind: AgentKind::Camera,
        capabilities: Capabilities {
            detects: true,
            ..Capabilities::NONE
        },
        act: enforcement::camera,
    },
];

/// Table entry for a kind
pub fn behavior_for(kind: AgentKind) -> &'static Behavior {
    let index = match kind {
        AgentKind::Normal => 0,
        AgentKind::ProperDisposer => 1,
        AgentKind::ImproperDisposer => 2,
        AgentKind::Police => 3,
        AgentKind::Collector => 4,
        AgentKind::Camera => 5,
    };
    &BEHAVIORS[index]
}

/// Events produced while running one tick
#[derive(Debug, Default)]
pub struct TickContext {
    pub tick: u64,
    pub events: Vec<SimEvent>,
}

impl TickContext {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

/// Run one agent's behavior: optional random step, then its rule
pub fn run_behavior(world: &mut World, entity: Entity, kind: AgentKind, ctx: &mut TickContext) {
    let behavior = behavior_for(kind);
    if behavior.capabilities.movable {
        movement::wander(world, entity);
    }
    (behavior.act)(world, entity, ctx);
}

/// Despawn a garbage item and clear every Collector target pointing at it
pub fn remove_garbage(world: &mut World, item: Entity) -> bool {
    if world.get::<Garbage>(item).is_none() {
        return false;
    }
    world.despawn(item);
    let mut targets = world.query::<&mut Target>();
    for mut target in targets.iter_mut(world) {
        if target.0 == Some(item) {
            target.0 = None;
        }
    }
    true
}
