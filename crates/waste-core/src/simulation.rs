//! Simulation Facade
//!
//! Owns the ECS world together with the scheduler, metrics, lifecycle,
//! clock and log sink, and exposes the control surface a driver uses:
//! setup / start / stop / step plus read-only snapshots.

use bevy_ecs::prelude::*;
use chrono::Utc;

use waste_events::{AgentKind, SimEvent, SimulationState, WorldSnapshot};

use crate::clock::{Clock, MonotonicClock};
use crate::components::{Blackboard, GridBounds, Position};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::events::{LogSink, NullSink};
use crate::lifecycle::Lifecycle;
use crate::metrics::MetricsTracker;
use crate::output::build_snapshot;
use crate::scheduler::StepScheduler;
use crate::setup::{init_world, populate, spawn_agent, spawn_garbage};

pub struct Simulation {
    world: World,
    scheduler: StepScheduler,
    metrics: MetricsTracker,
    lifecycle: Lifecycle,
    clock: Box<dyn Clock>,
    sink: Box<dyn LogSink>,
    config: SimConfig,
    tick: u64,
    last_events: Vec<SimEvent>,
}

impl Simulation {
    /// Build a simulation and run the initial setup. The random source is
    /// seeded here from `config.seed` and never reseeded.
    pub fn new(
        config: SimConfig,
        clock: Box<dyn Clock>,
        sink: Box<dyn LogSink>,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let mut world = World::new();
        init_world(&mut world, &config);
        let metrics = MetricsTracker::new(config.watchdog.inactivity_window_seconds, clock.now());

        let mut sim = Self {
            world,
            scheduler: StepScheduler::new(),
            metrics,
            lifecycle: Lifecycle::new(),
            clock,
            sink,
            config,
            tick: 0,
            last_events: Vec::new(),
        };
        sim.setup();
        Ok(sim)
    }

    /// Wall clock, no logging
    pub fn with_defaults(config: SimConfig) -> Result<Self, SimError> {
        Self::new(config, Box::new(MonotonicClock::new()), Box::new(NullSink))
    }

    /// Clear and repopulate the world and zero every counter. Allowed from
    /// any state.
    pub fn setup(&mut self) {
        self.lifecycle.reset();
        let placed = populate(
            &mut self.world,
            &self.config.population,
            self.config.grid.disposal_spacing,
        );
        self.metrics.reset(self.clock.now(), placed.garbage_count as u64);
        self.tick = 0;
        self.last_events.clear();

        tracing::info!(
            agents = placed.total_agents(),
            garbage = placed.garbage_count,
            "Simulation set up"
        );
        self.emit(&SimEvent::setup(self.tick, placed));
    }

    /// SETUP or STOPPED -> RUNNING. Re-arms the watchdog.
    pub fn start(&mut self) -> Result<(), SimError> {
        self.lifecycle.start()?;
        self.metrics.rearm(self.clock.now());
        tracing::info!(tick = self.tick, "Simulation started");
        self.emit(&SimEvent::start(self.tick));
        Ok(())
    }

    /// RUNNING -> STOPPED on operator request
    pub fn stop(&mut self) -> Result<(), SimError> {
        self.lifecycle.stop()?;
        tracing::info!(tick = self.tick, "Simulation stopped");
        self.emit(&SimEvent::stop(self.tick));
        Ok(())
    }

    /// Advance one tick. Returns false, changing nothing, unless RUNNING.
    pub fn step(&mut self) -> bool {
        if !self.lifecycle.can_step() {
            return false;
        }
        self.tick += 1;

        let events = self.scheduler.run_tick(&mut self.world, self.tick);
        let now = self.clock.now();
        for event in &events {
            self.metrics.observe(event, now);
            self.emit(event);
        }
        self.last_events = events;
        true
    }

    /// Stop the run if no arrest happened within the inactivity window.
    /// Returns true only on the call that performs the stop.
    pub fn check_activity(&mut self, now: f64) -> bool {
        if !self.lifecycle.can_step() || !self.metrics.is_inactive(now) {
            return false;
        }
        if self.lifecycle.stop().is_err() {
            return false;
        }
        tracing::info!(
            tick = self.tick,
            idle_seconds = now - self.metrics.last_arrest_time(),
            "Watchdog stopped the simulation"
        );
        self.emit(&SimEvent::watchdog_stop(self.tick));
        true
    }

    /// Put an agent on a chosen cell. Only allowed during SETUP.
    pub fn place_agent(&mut self, kind: AgentKind, x: u32, y: u32) -> Result<Entity, SimError> {
        let position = self.placement(x, y)?;
        Ok(spawn_agent(&mut self.world, kind, position))
    }

    /// Put a garbage item on a chosen cell. Only allowed during SETUP.
    pub fn place_garbage(&mut self, x: u32, y: u32) -> Result<Entity, SimError> {
        let position = self.placement(x, y)?;
        self.metrics.add_setup_garbage(1);
        Ok(spawn_garbage(&mut self.world, position))
    }

    fn placement(&self, x: u32, y: u32) -> Result<Position, SimError> {
        let state = self.lifecycle.state();
        if state != SimulationState::Setup {
            return Err(SimError::NotInSetup(state));
        }
        let bounds = self.world.resource::<GridBounds>();
        if !bounds.contains(x as i64, y as i64) {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Position::new(x, y))
    }

    pub fn snapshot(&mut self) -> WorldSnapshot {
        build_snapshot(
            &mut self.world,
            self.tick,
            self.lifecycle.state(),
            self.metrics.arrest_count(),
        )
    }

    pub fn state(&self) -> SimulationState {
        self.lifecycle.state()
    }

    pub fn arrest_count(&self) -> u64 {
        self.metrics.arrest_count()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    pub fn blackboard(&self) -> &Blackboard {
        self.world.resource::<Blackboard>()
    }

    /// Events produced by the most recent `step()`
    pub fn last_events(&self) -> &[SimEvent] {
        &self.last_events
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current reading of the simulation's clock
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn flush_log(&mut self) {
        if let Err(e) = self.sink.flush() {
            tracing::warn!("Failed to flush simulation log: {}", e);
        }
    }

    fn emit(&mut self, event: &SimEvent) {
        if !event.event_type.is_lifecycle() {
            tracing::debug!(
                tick = event.tick,
                kind = ?event.actor,
                x = event.cell.map(|c| c.x),
                y = event.cell.map(|c| c.y),
                "{}",
                event.message()
            );
        }
        if let Err(e) = self.sink.record(Utc::now(), event) {
            tracing::warn!(tick = event.tick, "Failed to write simulation log: {}", e);
        }
    }
}
