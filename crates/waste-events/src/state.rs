//! Simulation lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationState {
    /// Freshly populated, not yet started
    #[default]
    Setup,
    /// Ticks advance the world
    Running,
    /// Halted by operator or watchdog; may resume
    Stopped,
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimulationState::Setup => "SETUP",
            SimulationState::Running => "RUNNING",
            SimulationState::Stopped => "STOPPED",
        };
        f.write_str(name)
    }
}
