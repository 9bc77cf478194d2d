//! Renderer for smart terminals.
//!
//! The diagnostics stream is wrapped in a [`Spinner`] that owns the current
//! line while an operation runs. Messages are colored by severity and keep
//! their key/value context hidden unless the view is verbose.

use super::values::format_key_values;
use super::{
    EndOperationStatus, ErrorRef, KeyValues, MessageWriter, Output, ProgressGauge, SharedWriter,
    Silenced, Spinner, join_error,
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Default)]
struct Operation {
    status: String,
    gauge: Option<Arc<ProgressGauge>>,
}

impl Operation {
    fn final_status(&self) -> String {
        match &self.gauge {
            Some(gauge) => {
                let rendered = gauge.to_string();
                rendered.strip_prefix(' ').unwrap_or(&rendered).to_string()
            }
            None => self.status.clone(),
        }
    }
}

/// Results writer that takes the spinner's line before every write.
struct ResultWriter {
    out: SharedWriter,
    spinner: Arc<Spinner>,
}

impl Write for ResultWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let out = &mut self.out;
        self.spinner.with_line(|| out.write(buf))?
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Colored renderer with an animated operation line.
#[derive(Clone)]
pub struct InteractiveShell {
    out: SharedWriter,
    err_out: Arc<Spinner>,
    verbosity: i32,
    level: i32,
    values: KeyValues,
    operation: Arc<Mutex<Operation>>,
}

impl InteractiveShell {
    /// Render results to `out` and everything else to `err_out`, showing
    /// messages up to level `verbosity`.
    pub fn new<O, E>(out: O, err_out: E, verbosity: i32) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self::with_spinner(out, Spinner::new(err_out), verbosity)
    }

    /// Like [`new`](Self::new) with a spinner built by the caller, e.g. one
    /// with a specific frame format.
    pub fn with_spinner<O>(out: O, spinner: Spinner, verbosity: i32) -> Self
    where
        O: Write + Send + 'static,
    {
        Self {
            out: SharedWriter::new(out),
            err_out: Arc::new(spinner),
            verbosity,
            level: 0,
            values: KeyValues::new(),
            operation: Arc::new(Mutex::new(Operation::default())),
        }
    }

    /// A handle on the same streams, spinner and operation state with a
    /// different ceiling. Messages from both take the same line lock.
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

    fn decorate(&self, msg: &str) -> String {
        if self.level > 0 {
            format!("{msg}{}", format_key_values(&self.values))
        } else {
            msg.to_string()
        }
    }

    fn write_line(&self, line: &str) {
        let _ = self.err_out.write_all(format!("{line}\n").as_bytes());
    }

    fn finish(&self, operation: &mut Operation, marker: &EndOperationStatus) {
        let status = operation.final_status();
        self.err_out.stop();
        *operation = Operation::default();
        if status.is_empty() {
            let _ = self.err_out.clear_line();
            return;
        }
        let line = format!("\r{}\n", marker.colored_line(&status));
        let _ = self.err_out.write_all(line.as_bytes());
    }

    fn begin(&self, status: String, gauge: Option<Arc<ProgressGauge>>) {
        let mut operation = self.operation.lock();
        self.finish(&mut operation, &EndOperationStatus::success());
        self.err_out.set_suffix(format!(" {status} "));
        self.err_out.set_progress_gauge(gauge.clone());
        operation.status = status;
        operation.gauge = gauge;
        self.err_out.start();
    }
}

impl Output for InteractiveShell {
    fn info(&self, msg: &str) {
        self.write_line(&self.decorate(msg));
    }

    fn info_writer(&self) -> Box<dyn Write + Send> {
        let this = self.clone();
        Box::new(MessageWriter::new(move |msg: &str| this.info(msg)))
    }

    fn warn(&self, msg: &str) {
        self.write_line(&self.decorate(msg).yellow().to_string());
    }

    fn warn_writer(&self) -> Box<dyn Write + Send> {
        let this = self.clone();
        Box::new(MessageWriter::new(move |msg: &str| this.warn(msg)))
    }

    fn error(&self, err: ErrorRef<'_>, msg: &str) {
        let text = self.decorate(&join_error(err, msg));
        self.write_line(&text.red().to_string());
    }

    fn error_writer(&self) -> Box<dyn Write + Send> {
        let this = self.clone();
        Box::new(MessageWriter::new(move |msg: &str| this.error(None, msg)))
    }

    fn start_operation(&self, status: &str) {
        self.begin(status.to_string(), None);
    }

    fn start_operation_with_progress(&self, gauge: Arc<ProgressGauge>) {
        let status = gauge.status();
        self.begin(status, Some(gauge));
    }

    fn end_operation_with_status(&self, status: &EndOperationStatus) {
        let mut operation = self.operation.lock();
        self.finish(&mut operation, status);
    }

    fn result(&self, result: &str) {
        let _ = self.err_out.with_line(|| self.out.write_line(result));
    }

    fn result_writer(&self) -> Box<dyn Write + Send> {
        Box::new(ResultWriter {
            out: self.out.clone(),
            spinner: Arc::clone(&self.err_out),
        })
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
