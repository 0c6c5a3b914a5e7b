//! Snapshot Types
//!
//! Serialization structs for the read-only view of a simulation.
//!
//! A snapshot captures everything a renderer needs to draw one frame:
//! every entity's cell and color, the lifecycle state and the counters.

use serde::{Deserialize, Serialize};

use crate::{AgentKind, Cell, Rgb, SimulationState, DISPOSAL_AREA_COLOR, GARBAGE_COLOR};

/// One entity in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub x: u32,
    pub y: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

impl EntitySnapshot {
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

/// All live agents of one kind, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindGroup {
    pub kind: AgentKind,
    pub color: Rgb,
    pub members: Vec<EntitySnapshot>,
}

/// Complete observable state at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub state: SimulationState,
    pub arrest_count: u64,
    pub width: u32,
    pub height: u32,
    pub agents: Vec<KindGroup>,
    pub garbage: Vec<Cell>,
    #[serde(default = "default_garbage_color")]
    pub garbage_color: Rgb,
    pub disposal_areas: Vec<Cell>,
    #[serde(default = "default_disposal_area_color")]
    pub disposal_area_color: Rgb,
    /// Entries on the camera blackboard
    #[serde(default)]
    pub detections: usize,
}

fn default_garbage_color() -> Rgb {
    GARBAGE_COLOR
}

fn default_disposal_area_color() -> Rgb {
    DISPOSAL_AREA_COLOR
}

impl WorldSnapshot {
    /// Members of one kind, empty if the kind has no group
    pub fn members(&self, kind: AgentKind) -> &[EntitySnapshot] {
        self.agents
            .iter()
            .find(|g| g.kind == kind)
            .map(|g| g.members.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live agents of one kind
    pub fn count(&self, kind: AgentKind) -> usize {
        self.members(kind).len()
    }

    /// Total number of live agents
    pub fn total_agents(&self) -> usize {
        self.agents.iter().map(|g| g.members.len()).sum()
    }

    /// Every agent and garbage cell, for bounds checks
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.agents
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.cell()))
            .chain(self.garbage.iter().copied())
    }
}
