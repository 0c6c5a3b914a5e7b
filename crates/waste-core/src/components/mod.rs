//! ECS Components
//!
//! All entity components for agents, garbage, disposal areas and the grid.

pub mod agent;
pub mod grid;
pub mod items;

pub use agent::*;
pub use grid::*;
pub use items::*;
