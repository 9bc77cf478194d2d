//! A `tracing` layer that forwards events to a [`LogSink`].
//!
//! Level mapping:
//!
//! | tracing | sink                |
//! |---------|---------------------|
//! | ERROR   | `error`             |
//! | WARN    | `info`, level 0     |
//! | INFO    | `info`, level 0     |
//! | DEBUG   | `info`, level 1     |
//! | TRACE   | `info`, level 2     |
//!
//! The `message` field becomes the message, an `error` or `err` field the
//! error value, and every other field a key/value pair in declaration order.

use super::sink::LogSink;
use crate::output::KeyValues;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

// Events from this crate are dropped: they are emitted while renderer
// locks are held and would re-enter the renderer.
const OWN_TARGET: &str = "shellout";

pub(crate) fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// Sink level for a tracing level, `None` for errors.
pub fn sink_level(level: &Level) -> Option<i32> {
    match *level {
        Level::ERROR => None,
        Level::WARN | Level::INFO => Some(0),
        Level::DEBUG => Some(1),
        Level::TRACE => Some(2),
    }
}

/// Error value rebuilt from a recorded event field.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RecordedError(String);

#[derive(Default)]
struct EventVisitor {
    message: String,
    error: Option<RecordedError>,
    values: KeyValues,
}

impl EventVisitor {
    fn is_error_field(field: &Field) -> bool {
        matches!(field.name(), "error" | "err")
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            _ if Self::is_error_field(field) => {
                self.error = Some(RecordedError(value.to_string()));
            }
            name => self.values.push(name, value.to_string()),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        if Self::is_error_field(field) {
            self.error = Some(RecordedError(value.to_string()));
        } else {
            self.values.push(field.name(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        match field.name() {
            "message" => self.message = text,
            _ if Self::is_error_field(field) => self.error = Some(RecordedError(text)),
            name => self.values.push(name, text),
        }
    }
}

/// Layer forwarding events to a sink.
pub struct OutputLayer {
    sink: Arc<dyn LogSink>,
}

impl OutputLayer {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl<S> Layer<S> for OutputLayer
where
    S: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        if is_own_target(metadata.target()) {
            return false;
        }
        sink_level(metadata.level()).is_none_or(|level| self.sink.enabled(level))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        match sink_level(metadata.level()) {
            None => {
                let err = visitor.error.as_ref().map(|e| e as &(dyn Error + 'static));
                self.sink.error(err, &visitor.message, visitor.values);
            }
            Some(level) => {
                if let Some(err) = visitor.error {
                    visitor.values.push("error", err.to_string());
                }
                self.sink.info(level, &visitor.message, visitor.values);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_target_detection() {
        assert!(is_own_target("shellout"));
        assert!(is_own_target("shellout::output::spinner"));
        assert!(!is_own_target("shellout_plugin"));
        assert!(!is_own_target("my_app::shellout"));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(sink_level(&Level::ERROR), None);
        assert_eq!(sink_level(&Level::WARN), Some(0));
        assert_eq!(sink_level(&Level::INFO), Some(0));
        assert_eq!(sink_level(&Level::DEBUG), Some(1));
        assert_eq!(sink_level(&Level::TRACE), Some(2));
    }
}
