//! Waste Compliance Simulation Engine Library
//!
//! Public API for the simulation engine: agents wander a bounded grid,
//! drop and collect garbage, get penalized or arrested, and a watchdog
//! stops the run once arrests dry up.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod metrics;
pub mod output;
pub mod scheduler;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, PoliceTarget, SimConfig};
pub use error::SimError;
pub use events::{EventLogger, FanoutSink, LogSink, MemorySink, NullSink, TextLogSink};
pub use lifecycle::Lifecycle;
pub use metrics::{GarbageLedger, MetricsTracker};
pub use scheduler::{StepScheduler, TICK_ORDER};
pub use simulation::Simulation;

pub use waste_events::{AgentKind, Cell, SimEvent, SimulationState, WorldSnapshot};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
