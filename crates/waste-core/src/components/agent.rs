//! Agent Components
//!
//! One `Agent` component tagged by kind, plus the optional per-kind state.

use bevy_ecs::prelude::*;

use waste_events::AgentKind;

/// Component identifying an entity as an agent of some kind
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub kind: AgentKind,
}

impl Agent {
    pub fn new(kind: AgentKind) -> Self {
        Self { kind }
    }
}

/// Compliance score. Only Normal agents and ProperDisposers carry one.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub i32);

/// Garbage item a Collector is pursuing. Non-owning; cleared when the
/// item is removed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Target(pub Option<Entity>);

/// Registration order, assigned at spawn and never reused within a setup
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);

/// Resource handing out spawn order numbers
#[derive(Resource, Debug, Default)]
pub struct SpawnSequence {
    next: u64,
}

impl SpawnSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next);
        self.next += 1;
        order
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}
