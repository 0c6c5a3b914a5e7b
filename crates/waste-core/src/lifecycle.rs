//! Run Lifecycle
//!
//! SETUP -> RUNNING <-> STOPPED, with setup reachable from anywhere.

use waste_events::SimulationState;

use crate::error::SimError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    state: SimulationState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Only a running simulation advances
    pub fn can_step(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Begin (or resume) stepping
    pub fn start(&mut self) -> Result<(), SimError> {
        match self.state {
            SimulationState::Setup | SimulationState::Stopped => {
                self.state = SimulationState::Running;
                Ok(())
            }
            SimulationState::Running => Err(SimError::InvalidTransition {
                from: self.state,
                to: SimulationState::Running,
            }),
        }
    }

    pub fn stop(&mut self) -> Result<(), SimError> {
        if self.state != SimulationState::Running {
            return Err(SimError::InvalidTransition {
                from: self.state,
                to: SimulationState::Stopped,
            });
        }
        self.state = SimulationState::Stopped;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = SimulationState::Setup;
    }
}
