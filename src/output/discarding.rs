//! Output that drops everything, handy in tests and for quiet modes.

use super::{EndOperationStatus, ErrorRef, KeyValues, Output, ProgressGauge};
use std::io::{self, Write};
use std::sync::Arc;

/// Implements the whole [`Output`] contract as no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardingOutput;

impl DiscardingOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for DiscardingOutput {
    fn info(&self, _msg: &str) {}

    fn info_writer(&self) -> Box<dyn Write + Send> {
        Box::new(io::sink())
    }

    fn warn(&self, _msg: &str) {}

    fn warn_writer(&self) -> Box<dyn Write + Send> {
        Box::new(io::sink())
    }

    fn error(&self, _err: ErrorRef<'_>, _msg: &str) {}

    fn error_writer(&self) -> Box<dyn Write + Send> {
        Box::new(io::sink())
    }

    fn start_operation(&self, _status: &str) {}

    fn start_operation_with_progress(&self, _gauge: Arc<ProgressGauge>) {}

    fn end_operation_with_status(&self, _status: &EndOperationStatus) {}

    fn result(&self, _result: &str) {}

    fn result_writer(&self) -> Box<dyn Write + Send> {
        Box::new(io::sink())
    }

    fn v(&self, _level: i32) -> Box<dyn Output> {
        Box::new(*self)
    }

    fn with_values(&self, _values: KeyValues) -> Box<dyn Output> {
        Box::new(*self)
    }

    fn enabled(&self, _level: i32) -> bool {
        false
    }
}
