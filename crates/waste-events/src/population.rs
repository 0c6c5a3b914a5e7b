//! Population Counts
//!
//! How many of each entity a setup creates.

use serde::{Deserialize, Serialize};

use crate::AgentKind;

/// Number of entities of each kind placed at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationCounts {
    pub normal_count: usize,
    pub proper_disposer_count: usize,
    pub improper_disposer_count: usize,
    pub police_count: usize,
    pub collector_count: usize,
    pub camera_count: usize,
    pub garbage_count: usize,
}

impl Default for PopulationCounts {
    fn default() -> Self {
        Self {
            normal_count: 50,
            proper_disposer_count: 10,
            improper_disposer_count: 15,
            police_count: 5,
            collector_count: 5,
            camera_count: 10,
            garbage_count: 20,
        }
    }
}

impl PopulationCounts {
    /// A population with nothing in it
    pub fn empty() -> Self {
        Self {
            normal_count: 0,
            proper_disposer_count: 0,
            improper_disposer_count: 0,
            police_count: 0,
            collector_count: 0,
            camera_count: 0,
            garbage_count: 0,
        }
    }

    /// Configured count for an agent kind
    pub fn count_for(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::Normal => self.normal_count,
            AgentKind::ProperDisposer => self.proper_disposer_count,
            AgentKind::ImproperDisposer => self.improper_disposer_count,
            AgentKind::Police => self.police_count,
            AgentKind::Collector => self.collector_count,
            AgentKind::Camera => self.camera_count,
        }
    }

    /// Sets the count for an agent kind
    pub fn set_count(&mut self, kind: AgentKind, count: usize) {
        match kind {
            AgentKind::Normal => self.normal_count = count,
            AgentKind::ProperDisposer => self.proper_disposer_count = count,
            AgentKind::ImproperDisposer => self.improper_disposer_count = count,
            AgentKind::Police => self.police_count = count,
            AgentKind::Collector => self.collector_count = count,
            AgentKind::Camera => self.camera_count = count,
        }
    }

    /// Total number of agents, garbage excluded
    pub fn total_agents(&self) -> usize {
        AgentKind::all().iter().map(|k| self.count_for(*k)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let counts: PopulationCounts = serde_json::from_str(r#"{"police_count": 2}"#).unwrap();
        assert_eq!(counts.police_count, 2);
        assert_eq!(counts.normal_count, 50);
    }

    #[test]
    fn test_set_and_total() {
        let mut counts = PopulationCounts::empty();
        counts.set_count(AgentKind::Collector, 3);
        counts.set_count(AgentKind::Camera, 2);
        assert_eq!(counts.count_for(AgentKind::Collector), 3);
        assert_eq!(counts.total_agents(), 5);
    }
}
