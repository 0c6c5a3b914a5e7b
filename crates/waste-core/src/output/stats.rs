//! Run Summary
//!
//! End-of-run statistics written by the CLI.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use waste_events::{AgentKind, EventType, SimulationState, WorldSnapshot};

use crate::metrics::{GarbageLedger, MetricsTracker};

/// Final counters for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_state: SimulationState,
    pub arrest_count: u64,
    pub garbage_remaining: usize,
    pub detections: usize,
    pub ledger: GarbageLedger,
    pub surviving_agents: BTreeMap<String, usize>,
    pub events_by_type: BTreeMap<String, u64>,
}

impl RunSummary {
    pub fn new(snapshot: &WorldSnapshot, metrics: &MetricsTracker) -> Self {
        let surviving_agents = AgentKind::all()
            .iter()
            .map(|kind| (kind.label().to_string(), snapshot.count(*kind)))
            .collect();
        let events_by_type = EventType::all()
            .iter()
            .map(|t| (format!("{:?}", t), metrics.event_count(*t)))
            .filter(|(_, n)| *n > 0)
            .collect();

        Self {
            ticks: snapshot.tick,
            final_state: snapshot.state,
            arrest_count: snapshot.arrest_count,
            garbage_remaining: snapshot.garbage.len(),
            detections: snapshot.detections,
            ledger: metrics.ledger(),
            surviving_agents,
            events_by_type,
        }
    }

    /// Write the summary as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Print a short human-readable report
    pub fn print(&self) {
        println!("\n=== Run Summary ===");
        println!("Ticks:             {}", self.ticks);
        println!("Final state:       {}", self.final_state);
        println!("Arrests:           {}", self.arrest_count);
        println!("Garbage remaining: {}", self.garbage_remaining);
        println!("Detections:        {}", self.detections);
        println!(
            "Garbage ledger:    {} at setup, {} dropped, {} collected, {} reached",
            self.ledger.created_at_setup, self.ledger.dropped, self.ledger.collected, self.ledger.reached
        );
        println!("\nSurviving agents:");
        for (kind, count) in &self.surviving_agents {
            println!("  {:<18} {}", kind, count);
        }
        if !self.events_by_type.is_empty() {
            println!("\nEvents:");
            for (event_type, count) in &self.events_by_type {
                println!("  {:<18} {}", event_type, count);
            }
        }
    }
}
