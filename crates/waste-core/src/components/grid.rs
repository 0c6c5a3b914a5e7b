//! Grid Components
//!
//! Cell positions and the bounds policy every movement goes through.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use waste_events::Cell;

/// Component: an entity's cell on the grid
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Squared Euclidean distance to another cell
    pub fn distance_sq(&self, other: &Position) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

impl From<Cell> for Position {
    fn from(cell: Cell) -> Self {
        Self::new(cell.x, cell.y)
    }
}

/// What happens to a move that would leave the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Stop at the edge
    #[default]
    Clamp,
    /// Re-enter from the opposite edge
    Wrap,
}

/// Resource: grid dimensions and the active bounds policy
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub width: u32,
    pub height: u32,
    pub policy: BoundsPolicy,
}

impl GridBounds {
    pub fn new(width: u32, height: u32, policy: BoundsPolicy) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            policy,
        }
    }

    /// Whether a raw coordinate lies on the grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y)
    }

    /// Map an arbitrary coordinate onto the grid under the policy
    pub fn resolve(&self, x: i64, y: i64) -> Position {
        match self.policy {
            BoundsPolicy::Clamp => Position::new(clamp_axis(x, self.width), clamp_axis(y, self.height)),
            BoundsPolicy::Wrap => Position::new(wrap_axis(x, self.width), wrap_axis(y, self.height)),
        }
    }

    /// Cell reached by moving `(dx, dy)` from `from`
    pub fn offset(&self, from: Position, dx: i64, dy: i64) -> Position {
        self.resolve(from.x as i64 + dx, from.y as i64 + dy)
    }

    /// Lattice cells at every `spacing`-th line in both axes, column-major
    pub fn lattice(&self, spacing: u32) -> Vec<Position> {
        let step = spacing.max(1) as usize;
        let mut cells = Vec::new();
        for x in (0..self.width).step_by(step) {
            for y in (0..self.height).step_by(step) {
                cells.push(Position::new(x, y));
            }
        }
        cells
    }
}

fn clamp_axis(v: i64, len: u32) -> u32 {
    v.clamp(0, len as i64 - 1) as u32
}

fn wrap_axis(v: i64, len: u32) -> u32 {
    v.rem_euclid(len as i64) as u32
}
