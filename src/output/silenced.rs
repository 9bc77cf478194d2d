//! Output returned by `v(level)` when `level` exceeds the ceiling.

use super::{EndOperationStatus, ErrorRef, KeyValues, Output, ProgressGauge};
use std::io::{self, Write};
use std::sync::Arc;

/// Drops every message but keeps `v` and `enabled` working by delegating
/// them to the output it was derived from, so chains like
/// `output.v(5).v(0)` still reach a live view.
#[derive(Clone)]
pub struct Silenced {
    parent: Arc<dyn Output>,
}

impl Silenced {
    pub fn new(parent: Arc<dyn Output>) -> Self {
        Self { parent }
    }
}

impl Output for Silenced {
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

    fn v(&self, level: i32) -> Box<dyn Output> {
        self.parent.v(level)
    }

    fn with_values(&self, _values: KeyValues) -> Box<dyn Output> {
        Box::new(self.clone())
    }

    fn enabled(&self, level: i32) -> bool {
        self.parent.enabled(level)
    }
}
