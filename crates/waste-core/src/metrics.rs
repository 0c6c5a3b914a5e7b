//! Metrics and Watchdog
//!
//! Counts arrests and penalties, keeps the garbage ledger, and decides
//! when a run has gone quiet for too long.

use serde::Serialize;
use std::collections::HashMap;

use waste_events::{EventType, SimEvent};

/// Where every garbage item came from and went
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GarbageLedger {
    pub created_at_setup: u64,
    pub dropped: u64,
    pub collected: u64,
    pub reached: u64,
}

impl GarbageLedger {
    /// Number of items that should currently exist
    pub fn expected_live(&self) -> u64 {
        (self.created_at_setup + self.dropped).saturating_sub(self.collected + self.reached)
    }
}

/// Arrest counter, inactivity watchdog and garbage ledger
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    arrest_count: u64,
    last_arrest_time: f64,
    inactivity_window: f64,
    ledger: GarbageLedger,
    events_by_type: HashMap<EventType, u64>,
}

impl MetricsTracker {
    pub fn new(inactivity_window: f64, now: f64) -> Self {
        Self {
            arrest_count: 0,
            last_arrest_time: now,
            inactivity_window,
            ledger: GarbageLedger::default(),
            events_by_type: HashMap::new(),
        }
    }

    /// Zero every counter for a fresh setup
    pub fn reset(&mut self, now: f64, garbage_at_setup: u64) {
        self.arrest_count = 0;
        self.last_arrest_time = now;
        self.ledger = GarbageLedger {
            created_at_setup: garbage_at_setup,
            ..GarbageLedger::default()
        };
        self.events_by_type.clear();
    }

    /// Count a garbage item placed by hand before the run starts
    pub fn add_setup_garbage(&mut self, n: u64) {
        self.ledger.created_at_setup += n;
    }

    /// Add `n` arrests; any arrest restarts the inactivity window
    pub fn record_arrests(&mut self, n: u64, now: f64) {
        self.arrest_count += n;
        if n > 0 {
            self.last_arrest_time = now;
        }
    }

    /// Fold one event into the counters
    pub fn observe(&mut self, event: &SimEvent, now: f64) {
        *self.events_by_type.entry(event.event_type).or_insert(0) += 1;
        match event.event_type {
            EventType::Disposal => self.ledger.dropped += 1,
            EventType::Collection => self.ledger.collected += 1,
            EventType::Removal => self.ledger.reached += 1,
            _ => {}
        }
        self.record_arrests(event.arrests() as u64, now);
    }

    /// Restart the inactivity window without counting an arrest
    pub fn rearm(&mut self, now: f64) {
        self.last_arrest_time = now;
    }

    /// True once no arrest has happened for longer than the window
    pub fn is_inactive(&self, now: f64) -> bool {
        now - self.last_arrest_time > self.inactivity_window
    }

    pub fn arrest_count(&self) -> u64 {
        self.arrest_count
    }

    pub fn last_arrest_time(&self) -> f64 {
        self.last_arrest_time
    }

    pub fn inactivity_window(&self) -> f64 {
        self.inactivity_window
    }

    pub fn ledger(&self) -> GarbageLedger {
        self.ledger
    }

    pub fn event_count(&self, event_type: EventType) -> u64 {
        self.events_by_type.get(&event_type).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waste_events::{AgentKind, Cell};

    #[test]
    fn test_record_arrests_updates_time_only_when_positive() {
        let mut metrics = MetricsTracker::new(30.0, 0.0);
        metrics.record_arrests(0, 10.0);
        assert_eq!(metrics.last_arrest_time(), 0.0);
        metrics.record_arrests(2, 12.0);
        assert_eq!(metrics.arrest_count(), 2);
        assert_eq!(metrics.last_arrest_time(), 12.0);
    }

    #[test]
    fn test_inactivity_window_is_strict() {
        let metrics = MetricsTracker::new(30.0, 5.0);
        assert!(!metrics.is_inactive(35.0));
        assert!(metrics.is_inactive(35.5));
    }

    #[test]
    fn test_observe_updates_ledger_and_arrests() {
        let mut metrics = MetricsTracker::new(30.0, 0.0);
        metrics.reset(0.0, 4);
        let cell = Cell::new(1, 1);
        metrics.observe(&SimEvent::disposal(1, cell), 1.0);
        metrics.observe(&SimEvent::disposal(1, cell), 1.0);
        metrics.observe(&SimEvent::collection(1, cell), 1.0);
        metrics.observe(&SimEvent::removal(1, cell), 1.0);
        metrics.observe(&SimEvent::penalty(1, cell), 2.0);
        metrics.observe(&SimEvent::arrest(1, cell, AgentKind::ImproperDisposer, 2), 3.0);

        let ledger = metrics.ledger();
        assert_eq!(ledger.dropped, 2);
        assert_eq!(ledger.expected_live(), 4);
        assert_eq!(metrics.arrest_count(), 3);
        assert_eq!(metrics.last_arrest_time(), 3.0);
        assert_eq!(metrics.event_count(EventType::Disposal), 2);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut metrics = MetricsTracker::new(30.0, 0.0);
        metrics.record_arrests(5, 1.0);
        metrics.reset(9.0, 20);
        assert_eq!(metrics.arrest_count(), 0);
        assert_eq!(metrics.last_arrest_time(), 9.0);
        assert_eq!(metrics.ledger().created_at_setup, 20);
        assert_eq!(metrics.event_count(EventType::Arrest), 0);
    }
}
