//! Agent Kinds
//!
//! The agent kind tag, grid cells and the display colors renderers use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color triple
pub type Rgb = [u8; 3];

/// Color used to draw garbage items
pub const GARBAGE_COLOR: Rgb = [165, 42, 42];

/// Color used to draw disposal areas
pub const DISPOSAL_AREA_COLOR: Rgb = [0, 0, 0];

/// The kind of an agent. Every agent carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Wanders and occasionally disposes of waste off the lattice
    Normal,
    /// Picks up garbage it walks over
    ProperDisposer,
    /// Drops garbage wherever it goes
    ImproperDisposer,
    /// Arrests non-compliant agents sharing its cell
    Police,
    /// Pursues the nearest garbage item
    Collector,
    /// Stationary detector of low-score agents
    Camera,
}

impl AgentKind {
    /// Returns all agent kinds in declaration order.
    pub fn all() -> &'static [AgentKind] {
        &[
            AgentKind::Normal,
            AgentKind::ProperDisposer,
            AgentKind::ImproperDisposer,
            AgentKind::Police,
            AgentKind::Collector,
            AgentKind::Camera,
        ]
    }

    /// Snake-case label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Normal => "normal",
            AgentKind::ProperDisposer => "proper_disposer",
            AgentKind::ImproperDisposer => "improper_disposer",
            AgentKind::Police => "police",
            AgentKind::Collector => "collector",
            AgentKind::Camera => "camera",
        }
    }

    /// Display color for this kind.
    pub fn color(&self) -> Rgb {
        match self {
            AgentKind::Normal => [165, 42, 42],
            AgentKind::ProperDisposer => [255, 0, 255],
            AgentKind::ImproperDisposer => [255, 0, 0],
            AgentKind::Police => [255, 255, 0],
            AgentKind::Collector => [0, 255, 0],
            AgentKind::Camera => [255, 255, 255],
        }
    }

    /// Starting score for kinds that keep one.
    pub fn default_score(&self) -> Option<i32> {
        match self {
            AgentKind::Normal => Some(5),
            AgentKind::ProperDisposer => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Normal => "Normal",
            AgentKind::ProperDisposer => "ProperDisposer",
            AgentKind::ImproperDisposer => "ImproperDisposer",
            AgentKind::Police => "Police",
            AgentKind::Collector => "Collector",
            AgentKind::Camera => "Camera",
        };
        f.write_str(name)
    }
}

/// A grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
