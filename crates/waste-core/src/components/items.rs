//! Environment Components
//!
//! Garbage items, disposal areas and the camera blackboard.

use bevy_ecs::prelude::*;

use waste_events::Cell;

/// Marker component for a garbage item
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Garbage;

/// Marker component for a disposal-area cell
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DisposalArea;

/// A low-score agent spotted by a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub tick: u64,
    pub camera: Cell,
    pub agent: Entity,
    pub agent_cell: Cell,
    pub score: i32,
}

/// Resource: shared list of camera detections. Observational only.
#[derive(Resource, Debug, Default)]
pub struct Blackboard {
    pub detections: Vec<Detection>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, detections: impl IntoIterator<Item = Detection>) {
        self.detections.extend(detections);
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn clear(&mut self) {
        self.detections.clear();
    }
}
