//! Game log sinks.
//!
//! The engine reports what it is doing through a [`LogSink`]. Logging never
//! changes control flow: a game produces the same states with any sink.
//!
//! - [`TracingSink`] forwards entries to the `tracing` macros, so the usual
//!   `RUST_LOG`-style subscriber configuration applies.
//! - [`NullSink`] discards everything and reports itself disabled, so the
//!   engine skips formatting messages altogether.
//! - [`RecordingSink`] keeps entries in memory for inspection in tests.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Severity of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
}

/// Destination for engine log entries.
pub trait LogSink: Send + Sync {
    /// Whether entries at `level` would be kept. Checked before a message is
    /// formatted.
    fn enabled(&self, level: LogLevel) -> bool;

    /// Record one entry.
    fn log(&self, level: LogLevel, category: &str, message: &str);
}

/// Forwards entries to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error => tracing::enabled!(tracing::Level::ERROR),
            LogLevel::Warning => tracing::enabled!(tracing::Level::WARN),
            LogLevel::Info => tracing::enabled!(tracing::Level::INFO),
            LogLevel::Verbose => tracing::enabled!(tracing::Level::DEBUG),
            LogLevel::Debug => tracing::enabled!(tracing::Level::TRACE),
        }
    }

    fn log(&self, level: LogLevel, category: &str, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(category, "{message}"),
            LogLevel::Warning => tracing::warn!(category, "{message}"),
            LogLevel::Info => tracing::info!(category, "{message}"),
            LogLevel::Verbose => tracing::debug!(category, "{message}"),
            LogLevel::Debug => tracing::trace!(category, "{message}"),
        }
    }
}

/// Discards every entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _category: &str, _message: &str) {}
}

/// One recorded entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub category: String,
    pub message: String,
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Entries recorded under `category`.
    #[must_use]
    pub fn in_category(&self, category: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.category == category)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, level: LogLevel, category: &str, message: &str) {
        let entry = LogEntry {
            level,
            category: category.to_string(),
            message: message.to_string(),
        };
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_disabled() {
        let sink = NullSink;
        assert!(!sink.enabled(LogLevel::Error));
        sink.log(LogLevel::Error, "test", "ignored");
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.log(LogLevel::Info, "zone", "moved");
        sink.log(LogLevel::Debug, "task", "ran");

        assert_eq!(sink.entries().len(), 2);
        let zone = sink.in_category("zone");
        assert_eq!(zone.len(), 1);
        assert_eq!(zone[0].message, "moved");
        assert_eq!(zone[0].level, LogLevel::Info);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        let sink = TracingSink;
        if sink.enabled(LogLevel::Info) {
            sink.log(LogLevel::Info, "test", "hello");
        }
    }
}
