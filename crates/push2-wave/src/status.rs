//! Bounded status log and its projection to the status display.

use std::collections::VecDeque;
use tracing::info;

/// Maximum number of retained status lines.
pub const STATUS_LOG_CAPACITY: usize = 4;

/// Capacity-bounded FIFO of formatted status lines, oldest first.
#[derive(Debug, Default)]
pub struct StatusLog {
    entries: VecDeque<String>,
}

impl StatusLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(STATUS_LOG_CAPACITY),
        }
    }

    /// Appends an entry, evicting the oldest once past capacity.
    pub fn push(&mut self, entry: String) {
        self.entries.push_back(entry);
        while self.entries.len() > STATUS_LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Returns the number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins the retained entries with newlines, oldest first.
    pub fn projection(&self) -> String {
        let lines: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        lines.join("\n")
    }
}

/// Formats a 3-byte MIDI message for the status display.
pub fn format_midi_event(timestamp: f64, data: &[u8; 3]) -> String {
    format!(
        "Midi ({}): 0x{:02X} - 0x{:02X} - 0x{:02X}",
        timestamp, data[0], data[1], data[2]
    )
}

/// External status display accepting the current projection.
pub trait StatusSink: Send + Sync {
    /// Publishes the full status text, replacing the previous one.
    fn publish(&self, status: &str);
}

/// Sink that writes the status text to the log output.
pub struct LogSink;

impl StatusSink for LogSink {
    fn publish(&self, status: &str) {
        for line in status.lines() {
            info!("status: {}", line);
        }
    }
}
