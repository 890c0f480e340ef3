use burrow_core::{EventSink, LogEvent, LogLevel};
use std::sync::Arc;

/// Forwards events to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        let LogEvent {
            stack,
            level,
            package,
            message,
        } = event;

        match level {
            LogLevel::Debug => tracing::debug!(?stack, %package, "{message}"),
            LogLevel::Info => tracing::info!(?stack, %package, "{message}"),
            LogLevel::Warn => tracing::warn!(?stack, %package, "{message}"),
            LogLevel::Error => tracing::error!(?stack, %package, "{message}"),
            LogLevel::Fatal => tracing::error!(?stack, %package, fatal = true, "{message}"),
        }
    }
}

/// Sends every event to each of the wrapped sinks, in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: LogEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.emit(event.clone());
            }
            last.emit(event);
        }
    }
}
