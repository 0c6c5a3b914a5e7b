//! Shared event types and serialization for the waste compliance simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces them; drivers, renderers and log readers consume them.

pub mod event;
pub mod kind;
pub mod population;
pub mod snapshot;
pub mod state;

// Re-export kind types
pub use kind::{AgentKind, Cell, Rgb, DISPOSAL_AREA_COLOR, GARBAGE_COLOR};

// Re-export event types
pub use event::{EventType, SimEvent};

pub use population::PopulationCounts;

// Re-export snapshot types
pub use snapshot::{EntitySnapshot, KindGroup, WorldSnapshot};

pub use state::SimulationState;
