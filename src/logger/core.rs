//! Minimal logging primitives.
//!
//! A tiny logging surface shared by the build job and the query server:
//! a `LogLevel`, a `Logger` trait that is trivial to implement in tests,
//! and three implementations: `NoopLogger` (drop everything),
//! `StdoutLogger` (one compact JSON object per line) and `CaptureLogger`
//! (collect records for assertions).
//!
//! Implementors must be `Send + Sync + 'static` so a logger can be stored
//! in the process-global facade and shared between tasks.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short uppercase form used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Logger interface used throughout the crate.
///
/// The only required method is `log`; the per-level helpers are implemented
/// in terms of it so test loggers stay one method long.
pub trait Logger: Send + Sync + 'static {
    /// Emit a log record at the given level.
    fn log(&self, level: LogLevel, message: &str);

    /// Flush any buffered records.
    fn flush(&self) {}

    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Logger that drops every record. Default for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Writes one compact JSON object per record to stdout.
///
/// Shape: `{"ts":"<rfc3339>","level":"INFO","msg":"..."}`, easy for
/// structured log collectors to pick up without a framework dependency.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let json = serde_json::json!({
            "ts": chrono::Utc::now().to_rfc3339(),
            "level": level.as_str(),
            "msg": message,
        });
        println!("{}", json);
    }

    fn flush(&self) {
        // stdout is line-buffered; nothing to do
    }
}

/// Collects records in memory so tests can assert on them.
///
/// Clones share the same underlying buffer, so a test can hand one clone to
/// the code under test and keep another for inspection.
#[derive(Debug, Default, Clone)]
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records captured so far.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// True if any captured message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|(_, msg)| msg.contains(needle))
    }
}

impl Logger for CaptureLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}
