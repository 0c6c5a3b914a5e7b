//! Simulation Systems
//!
//! Spatial queries, movement and the per-kind behavior table.

pub mod behavior;
pub mod movement;
pub mod spatial;

pub use behavior::{behavior_for, remove_garbage, run_behavior, Behavior, Capabilities, TickContext, BEHAVIORS};
pub use movement::{move_agent, step_toward, wander};
