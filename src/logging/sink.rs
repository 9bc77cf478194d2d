//! The leveled-logging contract and its [`Output`]-backed implementation.

use crate::output::{ErrorRef, KeyValues, Output};
use std::sync::Arc;

/// What a leveled logger needs from its backend.
///
/// Levels follow the usual convention: 0 is always-on informative output,
/// higher numbers are more verbose. Errors are never level filtered.
pub trait LogSink: Send + Sync {
    fn enabled(&self, level: i32) -> bool;

    fn info(&self, level: i32, msg: &str, values: KeyValues);

    fn error(&self, err: ErrorRef<'_>, msg: &str, values: KeyValues);

    /// A sink whose messages sit `level` steps above this one.
    fn v(&self, level: i32) -> Box<dyn LogSink>;

    fn with_values(&self, values: KeyValues) -> Box<dyn LogSink>;

    /// Logger names are accepted and dropped.
    fn with_name(&self, name: &str) -> Box<dyn LogSink>;
}

/// Drives an [`Output`] from leveled-logging calls.
#[derive(Clone)]
pub struct OutputSink {
    output: Arc<dyn Output>,
    level: i32,
}

impl OutputSink {
    pub fn new(output: Arc<dyn Output>) -> Self {
        Self { output, level: 0 }
    }

    /// Accumulated level of this sink.
    pub fn level(&self) -> i32 {
        self.level
    }
}

fn trim_newlines(msg: &str) -> &str {
    msg.trim_end_matches('\n')
}

impl LogSink for OutputSink {
    fn enabled(&self, level: i32) -> bool {
        self.output.enabled(self.level.saturating_add(level))
    }

    fn info(&self, level: i32, msg: &str, values: KeyValues) {
        // Renderer views keep the last requested level, so ask for the total.
        self.output
            .v(self.level.saturating_add(level))
            .with_values(values)
            .info(trim_newlines(msg));
    }

    fn error(&self, err: ErrorRef<'_>, msg: &str, values: KeyValues) {
        self.output.with_values(values).error(err, trim_newlines(msg));
    }

    fn v(&self, level: i32) -> Box<dyn LogSink> {
        let level = self.level.saturating_add(level);
        Box::new(Self {
            output: Arc::from(self.output.v(level)),
            level,
        })
    }

    fn with_values(&self, values: KeyValues) -> Box<dyn LogSink> {
        Box::new(Self {
            output: Arc::from(self.output.with_values(values)),
            level: self.level,
        })
    }

    fn with_name(&self, _name: &str) -> Box<dyn LogSink> {
        Box::new(self.clone())
    }
}
