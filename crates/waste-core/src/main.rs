//! Waste Compliance Simulation
//!
//! Headless driver: set up a population, run it until the tick budget is
//! spent or the inactivity watchdog stops it, then print a run summary.

use clap::Parser;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use waste_core::config::DEFAULT_CONFIG_PATH;
use waste_core::output::RunSummary;
use waste_core::{
    Clock, EventLogger, FanoutSink, ManualClock, MonotonicClock, SimConfig, Simulation,
    SimulationState, TextLogSink,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "waste_sim")]
#[command(about = "Agent-based waste compliance simulation")]
struct Args {
    /// TOML config file (defaults to ./waste_sim.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Plain text event log
    #[arg(long, default_value = "simulation_log.txt")]
    log: PathBuf,

    /// Also write structured events as JSONL, alongside the text log
    #[arg(long)]
    events: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write the final world snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Simulated seconds per tick; 0 uses the wall clock
    #[arg(long, default_value_t = 0.0)]
    frame_seconds: f64,

    /// Write the default configuration and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.write_default_config {
        let path = args
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        fs::write(&path, SimConfig::default().to_toml()?)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    println!("Waste Compliance Simulation");
    println!("===========================");
    println!("Seed: {}", config.seed);
    println!("Ticks: {}", args.ticks);
    println!(
        "Grid: {}x{} ({:?} bounds)",
        config.grid.grid_width, config.grid.grid_height, config.grid.bounds_policy
    );
    println!();

    let sink = build_sink(&args.log, args.events.as_deref())?;
    let manual_clock = (args.frame_seconds > 0.0).then(ManualClock::new);
    let clock: Box<dyn Clock> = match &manual_clock {
        Some(clock) => Box::new(clock.clone()),
        None => Box::new(MonotonicClock::new()),
    };

    let mut sim = Simulation::new(config, clock, Box::new(sink))?;
    sim.start()?;

    for _ in 0..args.ticks {
        if !sim.step() {
            break;
        }
        if let Some(clock) = &manual_clock {
            clock.advance(args.frame_seconds);
        }
        let now = sim.now();
        if sim.check_activity(now) {
            break;
        }
        if sim.tick() % 100 == 0 {
            tracing::info!(
                tick = sim.tick(),
                arrests = sim.arrest_count(),
                "Progress"
            );
        }
    }
    if sim.state() == SimulationState::Running {
        sim.stop()?;
    }
    sim.flush_log();

    let snapshot = sim.snapshot();
    let summary = RunSummary::new(&snapshot, sim.metrics());
    summary.print();

    if let Some(path) = &args.summary {
        summary.write_json(path)?;
        println!("\nSummary written to {}", path.display());
    }

    if let Some(path) = &args.snapshot {
        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        println!("\nSnapshot written to {}", path.display());
    }

    Ok(())
}

/// Text log always, JSONL events when requested
fn build_sink(log: &Path, events: Option<&Path>) -> io::Result<FanoutSink> {
    let mut sink = FanoutSink::new().with(TextLogSink::open(log)?);
    if let Some(path) = events {
        sink = sink.with(EventLogger::new(path)?);
    }
    Ok(sink)
}

/// Explicit path, then ./waste_sim.toml, then built-in defaults
fn load_config(path: Option<&Path>) -> Result<SimConfig, Box<dyn Error>> {
    if let Some(path) = path {
        return Ok(SimConfig::load(path)?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        tracing::info!("Loading {}", DEFAULT_CONFIG_PATH);
        return Ok(SimConfig::load(default_path)?);
    }
    Ok(SimConfig::default())
}
