//! Simulation error types.

use thiserror::Error;

use waste_events::SimulationState;

use crate::config::ConfigError;

/// Errors returned by the simulation control surface
#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: SimulationState,
        to: SimulationState,
    },
    #[error("entities can only be placed during SETUP, current state is {0}")]
    NotInSetup(SimulationState),
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
