//! Event Types
//!
//! Structured records of everything the simulation reports: lifecycle
//! transitions and agent interactions.

use serde::{Deserialize, Serialize};

use crate::{AgentKind, Cell, PopulationCounts};

/// Primary event type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// World repopulated
    Setup,
    /// Run started or resumed
    Start,
    /// Run stopped by an explicit command
    Stop,
    /// Run stopped by the inactivity watchdog
    WatchdogStop,
    /// ImproperDisposer dropped a garbage item
    Disposal,
    /// Normal agent penalized for disposing off the lattice
    Penalty,
    /// ProperDisposer picked up a garbage item
    Collection,
    /// Collector reached and removed its target
    Removal,
    /// Police removed one or more agents
    Arrest,
    /// Camera spotted low-score agents
    Detection,
}

impl EventType {
    /// Returns all event type variants.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Setup,
            EventType::Start,
            EventType::Stop,
            EventType::WatchdogStop,
            EventType::Disposal,
            EventType::Penalty,
            EventType::Collection,
            EventType::Removal,
            EventType::Arrest,
            EventType::Detection,
        ]
    }

    /// Whether this event changes the lifecycle state
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            EventType::Setup | EventType::Start | EventType::Stop | EventType::WatchdogStop
        )
    }
}

/// A single simulation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    pub event_type: EventType,
    /// Kind of the agent that acted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<AgentKind>,
    /// Cell where the interaction happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
    /// Number of agents affected (arrests, detections)
    #[serde(default)]
    pub count: u32,
    /// Kind of the agents removed by an arrest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<AgentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<PopulationCounts>,
}

impl SimEvent {
    fn bare(tick: u64, event_type: EventType) -> Self {
        Self {
            tick,
            event_type,
            actor: None,
            cell: None,
            count: 0,
            target: None,
            population: None,
        }
    }

    fn at(tick: u64, event_type: EventType, actor: AgentKind, cell: Cell) -> Self {
        Self {
            actor: Some(actor),
            cell: Some(cell),
            ..Self::bare(tick, event_type)
        }
    }

    pub fn setup(tick: u64, population: PopulationCounts) -> Self {
        Self {
            population: Some(population),
            ..Self::bare(tick, EventType::Setup)
        }
    }

    pub fn start(tick: u64) -> Self {
        Self::bare(tick, EventType::Start)
    }

    pub fn stop(tick: u64) -> Self {
        Self::bare(tick, EventType::Stop)
    }

    pub fn watchdog_stop(tick: u64) -> Self {
        Self::bare(tick, EventType::WatchdogStop)
    }

    pub fn disposal(tick: u64, cell: Cell) -> Self {
        Self::at(tick, EventType::Disposal, AgentKind::ImproperDisposer, cell)
    }

    pub fn penalty(tick: u64, cell: Cell) -> Self {
        Self {
            count: 1,
            ..Self::at(tick, EventType::Penalty, AgentKind::Normal, cell)
        }
    }

    pub fn collection(tick: u64, cell: Cell) -> Self {
        Self::at(tick, EventType::Collection, AgentKind::ProperDisposer, cell)
    }

    pub fn removal(tick: u64, cell: Cell) -> Self {
        Self::at(tick, EventType::Removal, AgentKind::Collector, cell)
    }

    pub fn arrest(tick: u64, cell: Cell, target: AgentKind, count: u32) -> Self {
        Self {
            count,
            target: Some(target),
            ..Self::at(tick, EventType::Arrest, AgentKind::Police, cell)
        }
    }

    pub fn detection(tick: u64, cell: Cell, count: u32) -> Self {
        Self {
            count,
            ..Self::at(tick, EventType::Detection, AgentKind::Camera, cell)
        }
    }

    /// How much this event adds to the arrest (penalty) count
    pub fn arrests(&self) -> u32 {
        match self.event_type {
            EventType::Penalty | EventType::Arrest => self.count,
            _ => 0,
        }
    }

    /// Human-readable log line, without timestamp
    pub fn message(&self) -> String {
        let cell = self
            .cell
            .map(|c| c.to_string())
            .unwrap_or_else(|| "(?, ?)".to_string());
        match self.event_type {
            EventType::Setup => {
                let p = self.population.unwrap_or_else(PopulationCounts::empty);
                format!(
                    "Simulation Setup: Created {} normal agents, {} proper disposers, \
                     {} improper disposers, {} police agents, {} garbage collectors, \
                     {} cameras, and {} garbage items",
                    p.normal_count,
                    p.proper_disposer_count,
                    p.improper_disposer_count,
                    p.police_count,
                    p.collector_count,
                    p.camera_count,
                    p.garbage_count,
                )
            }
            EventType::Start => "Simulation started.".to_string(),
            EventType::Stop => "Simulation stopped by operator.".to_string(),
            EventType::WatchdogStop => {
                "Simulation stopped due to inactivity in arrests.".to_string()
            }
            EventType::Disposal => {
                format!("Improper Disposal: ImproperDisposer at {} disposed garbage", cell)
            }
            EventType::Penalty => format!("Improper Disposal: Agent at {} penalized", cell),
            EventType::Collection => {
                format!("Garbage Collection: Disposer at {} collected garbage", cell)
            }
            EventType::Removal => format!("Garbage Removal: Collector at {} removed garbage", cell),
            EventType::Arrest => {
                let who = match self.target {
                    Some(AgentKind::ImproperDisposer) => "ImproperDisposers",
                    _ => "agents",
                };
                format!("Arrest: Police agent at {} arrested {} {}", cell, self.count, who)
            }
            EventType::Detection => format!(
                "Camera Detection: {} illegal disposal agents detected",
                self.count
            ),
        }
    }
}
