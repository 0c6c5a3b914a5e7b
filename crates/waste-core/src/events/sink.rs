//! Log Sinks
//!
//! The simulation hands each event to a `LogSink` along with the wall-clock
//! time it happened. Sinks decide how (or whether) to persist it.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use waste_events::SimEvent;

/// Destination for simulation events
pub trait LogSink {
    fn record(&mut self, timestamp: DateTime<Utc>, event: &SimEvent) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Format a timestamp the way every text sink writes it
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&mut self, _timestamp: DateTime<Utc>, _event: &SimEvent) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps messages in memory. Clones share the same buffer, so a test can
/// hand one to the simulation and read from the other.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn count_matching(&self, needle: &str) -> usize {
        self.lines.borrow().iter().filter(|l| l.contains(needle)).count()
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, _timestamp: DateTime<Utc>, event: &SimEvent) -> io::Result<()> {
        self.lines.borrow_mut().push(event.message());
        Ok(())
    }
}

/// Plain text log, one `<timestamp> - <message>` line per event
pub struct TextLogSink {
    writer: BufWriter<File>,
}

impl TextLogSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl LogSink for TextLogSink {
    fn record(&mut self, timestamp: DateTime<Utc>, event: &SimEvent) -> io::Result<()> {
        writeln!(self.writer, "{} - {}", format_timestamp(timestamp), event.message())?;
        self.writer.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Forwards every event to each inner sink. A failing sink does not stop
/// the others; the first error is returned.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn LogSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl LogSink for FanoutSink {
    fn record(&mut self, timestamp: DateTime<Utc>, event: &SimEvent) -> io::Result<()> {
        let mut result = Ok(());
        for sink in &mut self.sinks {
            if let Err(e) = sink.record(timestamp, event) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut result = Ok(());
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use waste_events::{AgentKind, Cell};

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let mut handle = sink.clone();
        handle.record(Utc::now(), &SimEvent::stop(3)).unwrap();
        assert_eq!(sink.messages(), vec!["Simulation stopped by operator.".to_string()]);
        assert_eq!(sink.count_matching("stopped"), 1);
    }

    #[test]
    fn test_text_sink_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation_log.txt");
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        let mut sink = TextLogSink::open(&path).unwrap();
        let event = SimEvent::arrest(4, Cell::new(2, 3), AgentKind::ImproperDisposer, 1);
        sink.record(ts, &event).unwrap();
        drop(sink);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.trim_end(),
            format!("2024-05-01T12:30:00.000000Z - {}", event.message())
        );
    }

    #[test]
    fn test_text_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        for tick in 0..2 {
            let mut sink = TextLogSink::open(&path).unwrap();
            sink.record(Utc::now(), &SimEvent::start(tick)).unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    struct FailingSink;

    impl LogSink for FailingSink {
        fn record(&mut self, _timestamp: DateTime<Utc>, _event: &SimEvent) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let mut sink = FanoutSink::new()
            .with(first.clone())
            .with(FailingSink)
            .with(second.clone());
        assert_eq!(sink.len(), 3);

        let err = sink.record(Utc::now(), &SimEvent::start(0)).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(first.messages(), vec!["Simulation started.".to_string()]);
        assert_eq!(second.messages(), first.messages());
    }

    #[test]
    fn test_fanout_text_and_jsonl_files() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("simulation_log.txt");
        let jsonl_path = dir.path().join("events.jsonl");

        let mut sink = FanoutSink::new()
            .with(TextLogSink::open(&text_path).unwrap())
            .with(crate::events::EventLogger::new(&jsonl_path).unwrap());
        sink.record(Utc::now(), &SimEvent::watchdog_stop(9)).unwrap();
        sink.flush().unwrap();
        drop(sink);

        let text = std::fs::read_to_string(&text_path).unwrap();
        assert!(text.trim_end().ends_with(" - Simulation stopped due to inactivity in arrests."));
        let jsonl = std::fs::read_to_string(&jsonl_path).unwrap();
        assert_eq!(jsonl.lines().count(), 1);
        assert!(jsonl.contains("\"event_type\":\"watchdog_stop\""));
    }

    #[test]
    fn test_null_sink_accepts_anything() {
        let mut sink = NullSink;
        assert!(sink.record(Utc::now(), &SimEvent::start(0)).is_ok());
        assert!(sink.flush().is_ok());
    }
}
