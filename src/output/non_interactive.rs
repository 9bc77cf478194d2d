//! Line-oriented renderer for pipes, files and log collectors.
//!
//! Every message is one self-contained line:
//!
//! ```text
//! 2022-01-10 18:07:49 INF some message    key=value
//! ```
//!
//! Nothing is ever redrawn, so the output can be appended to a log as is.

use super::values::format_key_values;
use super::{
    EndOperationStatus, ErrorRef, KeyValues, MessageWriter, Output, ProgressGauge, SharedWriter,
    Silenced,
};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only, timestamped renderer.
#[derive(Clone)]
pub struct NonInteractiveShell {
    out: SharedWriter,
    err_out: SharedWriter,
    // Maximum level that is rendered.
    verbosity: i32,
    // Level of this view.
    level: i32,
    values: KeyValues,
    // Status of the operation in progress, shared by all views.
    operation: Arc<Mutex<Option<String>>>,
}

impl NonInteractiveShell {
    /// Render results to `out` and everything else to `err_out`, showing
    /// messages up to level `verbosity`.
    pub fn new<O, E>(out: O, err_out: E, verbosity: i32) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: SharedWriter::new(out),
            err_out: SharedWriter::new(err_out),
            verbosity,
            level: 0,
            values: KeyValues::new(),
            operation: Arc::new(Mutex::new(None)),
        }
    }

    /// A handle on the same streams and operation state with a different
    /// ceiling.
    pub fn with_verbosity(&self, verbosity: i32) -> Self {
        Self {
            verbosity,
            ..self.clone()
        }
    }

    /// Level of this view.
    pub fn level(&self) -> i32 {
        self.level
    }

    fn emit(&self, tag: &str, msg: &str, values: &KeyValues) {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        self.err_out.write_line(&format!(
            "{timestamp} {tag} {msg}{}",
            format_key_values(values)
        ));
    }

    fn finish(&self, operation: &mut Option<String>, status: &EndOperationStatus) {
        if let Some(current) = operation.take().filter(|s| !s.is_empty()) {
            self.info(&status.plain_line(&current));
        }
    }

    fn begin(&self, status: String) {
        let mut operation = self.operation.lock();
        self.finish(&mut operation, &EndOperationStatus::success());
        self.info(&format!(" • {status}..."));
        *operation = Some(status);
    }
}

impl Output for NonInteractiveShell {
    fn info(&self, msg: &str) {
        self.emit("INF", msg, &self.values);
    }

    fn info_writer(&self) -> Box<dyn Write + Send> {
        let this = self.clone();
        Box::new(MessageWriter::new(move |msg: &str| this.info(msg)))
    }

    fn warn(&self, msg: &str) {
        self.emit("WRN", msg, &self.values);
    }

    fn warn_writer(&self) -> Box<dyn Write + Send> {
        let this = self.clone();
        Box::new(MessageWriter::new(move |msg: &str| this.warn(msg)))
    }

    fn error(&self, err: ErrorRef<'_>, msg: &str) {
        let err = err.map_or_else(|| "<nil>".to_string(), ToString::to_string);
        let values = KeyValues::new().with("err", err).concat(&self.values);
        self.emit("ERR", msg, &values);
    }

    fn error_writer(&self) -> Box<dyn Write + Send> {
        let this = self.clone();
        Box::new(MessageWriter::new(move |msg: &str| this.error(None, msg)))
    }

    fn start_operation(&self, status: &str) {
        self.begin(status.to_string());
    }

    fn start_operation_with_progress(&self, gauge: Arc<ProgressGauge>) {
        let rendered = gauge.to_string();
        let status = rendered.strip_prefix(' ').unwrap_or(&rendered);
        self.begin(status.to_string());
    }

    fn end_operation_with_status(&self, status: &EndOperationStatus) {
        let mut operation = self.operation.lock();
        self.finish(&mut operation, status);
    }

    fn result(&self, result: &str) {
        self.out.write_line(result);
    }

    fn result_writer(&self) -> Box<dyn Write + Send> {
        Box::new(self.out.clone())
    }

    fn v(&self, level: i32) -> Box<dyn Output> {
        if !self.enabled(level) {
            return Box::new(Silenced::new(Arc::new(self.clone())));
        }
        Box::new(Self {
            level,
            ..self.clone()
        })
    }

    fn with_values(&self, values: KeyValues) -> Box<dyn Output> {
        Box::new(Self {
            values: self.values.concat(&values),
            ..self.clone()
        })
    }

    fn enabled(&self, level: i32) -> bool {
        level <= self.verbosity
    }
}
