//! A `log::Log` implementation forwarding records to a [`LogSink`].
//!
//! Records use the same level mapping as the tracing bridge, `Error` to
//! `error` and `Warn`/`Info` to level 0, `Debug` to 1, `Trace` to 2, shifted
//! by a level offset. Hosts use an offset of 1 so that plain library logs
//! only show with `-v`. Errors are never filtered.

use super::layer::is_own_target;
use super::sink::LogSink;
use crate::error::{ShelloutError, ShelloutResult};
use crate::output::KeyValues;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Arc;

/// Sink level for a `log` level, `None` for errors.
pub fn record_level(level: Level) -> Option<i32> {
    match level {
        Level::Error => None,
        Level::Warn | Level::Info => Some(0),
        Level::Debug => Some(1),
        Level::Trace => Some(2),
    }
}

/// Logger backed by a sink.
pub struct SinkLogger {
    sink: Arc<dyn LogSink>,
    offset: i32,
}

impl SinkLogger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink, offset: 0 }
    }

    /// Shift every non-error record `offset` levels up.
    pub fn with_level_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    fn sink_level(&self, level: Level) -> Option<i32> {
        record_level(level).map(|l| l.saturating_add(self.offset))
    }

    /// Most verbose `log` level the sink will render.
    pub fn max_level(&self) -> LevelFilter {
        [Level::Trace, Level::Debug, Level::Info]
            .into_iter()
            .find(|level| self.sink_level(*level).is_some_and(|l| self.sink.enabled(l)))
            .map_or(LevelFilter::Error, |level| level.to_level_filter())
    }
}

impl Log for SinkLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        if is_own_target(metadata.target()) {
            return false;
        }
        self.sink_level(metadata.level())
            .is_none_or(|level| self.sink.enabled(level))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        match self.sink_level(record.level()) {
            None => self.sink.error(None, &msg, KeyValues::new()),
            Some(level) => self.sink.info(level, &msg, KeyValues::new()),
        }
    }

    fn flush(&self) {}
}

/// Install a [`SinkLogger`] with the given level offset as the global `log`
/// logger. Fails if one is already set.
pub fn install_log_facade(sink: Arc<dyn LogSink>, level_offset: i32) -> ShelloutResult<()> {
    let logger = SinkLogger::new(sink).with_level_offset(level_offset);
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger)).map_err(|_| ShelloutError::LoggingAlreadyInstalled)?;
    log::set_max_level(max_level);
    Ok(())
}
