//! Event Logger
//!
//! Append-only JSONL event logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use waste_events::SimEvent;

use super::sink::{format_timestamp, LogSink};

/// One line of the JSONL log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub event_id: String,
    pub timestamp: String,
    pub message: String,
    #[serde(flatten)]
    pub event: SimEvent,
}

/// Writes each event as a JSON object on its own line
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    next_event_id: u64,
}

impl EventLogger {
    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            next_event_id: 1,
        })
    }

    /// Create a logger that discards events (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            next_event_id: 1,
        }
    }

    fn next_id(&mut self) -> String {
        let id = format!("evt_{:08}", self.next_event_id);
        self.next_event_id += 1;
        id
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Log an event to the file
    pub fn log(&mut self, timestamp: DateTime<Utc>, event: &SimEvent) -> io::Result<()> {
        self.event_count += 1;
        let record = LogRecord {
            event_id: self.next_id(),
            timestamp: format_timestamp(timestamp),
            message: event.message(),
            event: event.clone(),
        };
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(&record)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl LogSink for EventLogger {
    fn record(&mut self, timestamp: DateTime<Utc>, event: &SimEvent) -> io::Result<()> {
        self.log(timestamp, event)
    }

    fn flush(&mut self) -> io::Result<()> {
        EventLogger::flush(self)
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event logger: {}", e);
        }
    }
}
