//! Event System
//!
//! Log sinks that receive every simulation event.

pub mod logger;
pub mod sink;

pub use logger::EventLogger;
pub use sink::{FanoutSink, LogSink, MemorySink, NullSink, TextLogSink};
