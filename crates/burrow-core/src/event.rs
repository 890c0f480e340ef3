use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Which half of the system produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// A single application log event, shaped for the remote log collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub stack: Stack,
    pub level: LogLevel,
    /// Logical area that emitted the event, e.g. `service` or `controller`.
    pub package: String,
    pub message: String,
}

impl LogEvent {
    pub fn backend(level: LogLevel, package: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stack: Stack::Backend,
            level,
            package: package.into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for [`LogEvent`]s.
///
/// `emit` must not block on I/O and must not fail: implementations that
/// ship events elsewhere queue them and drop on backpressure.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: LogEvent);

    fn debug(&self, package: &str, message: String) {
        self.emit(LogEvent::backend(LogLevel::Debug, package, message));
    }

    fn info(&self, package: &str, message: String) {
        self.emit(LogEvent::backend(LogLevel::Info, package, message));
    }

    fn warn(&self, package: &str, message: String) {
        self.emit(LogEvent::backend(LogLevel::Warn, package, message));
    }

    fn error(&self, package: &str, message: String) {
        self.emit(LogEvent::backend(LogLevel::Error, package, message));
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: LogEvent) {}
}
