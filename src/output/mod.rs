//! Leveled, structured console output.
//!
//! Commands report through one [`Output`]:
//! - messages (`info`, `warn`, `error`) go to the diagnostics stream,
//! - results go to the results stream, undecorated and unfiltered,
//! - long-running steps are bracketed by `start_operation*` and
//!   `end_operation*`, which an interactive terminal shows as a spinner.
//!
//! Two renderers implement the contract: [`InteractiveShell`] for smart
//! terminals and [`NonInteractiveShell`] for pipes and log collectors.
//! [`DiscardingOutput`] drops everything.
//!
//! ```
//! use shellout::kv;
//! use shellout::output::{NonInteractiveShell, Output};
//! use std::io;
//!
//! let output = NonInteractiveShell::new(io::sink(), io::sink(), 1);
//! output.start_operation("installing package");
//! output.v(1).with_values(kv!["version" => "1.2.3"]).info("fetched");
//! output.end_operation(true);
//! output.result("package installed");
//! ```

pub mod discarding;
pub mod gauge;
pub mod interactive;
pub mod non_interactive;
pub mod silenced;
pub mod spinner;
pub mod status;
pub mod values;
pub mod writer;

pub use discarding::DiscardingOutput;
pub use gauge::{ProgressGauge, human_readable_duration};
pub use interactive::InteractiveShell;
pub use non_interactive::NonInteractiveShell;
pub use silenced::Silenced;
pub use spinner::Spinner;
pub use status::EndOperationStatus;
pub use values::{KeyValue, KeyValues, format_key_values};
pub use writer::{MessageWriter, SharedWriter};

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Borrowed error passed to [`Output::error`]. `None` means "an error
/// occurred but there is no error value".
pub type ErrorRef<'a> = Option<&'a (dyn Error + 'static)>;

/// The capability every renderer provides.
///
/// None of these methods fail. Writer errors are swallowed and odd input
/// (such as a gauge without capacity) degrades to plain text.
pub trait Output: Send + Sync {
    /// Informative output.
    ///
    /// ```ignore
    /// output.info("namespace created");
    /// ```
    fn info(&self, msg: &str);

    /// Informative output from format arguments.
    ///
    /// ```ignore
    /// output.infof(format_args!("namespace {namespace:?} created"));
    /// ```
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.info(&args.to_string());
    }

    /// Writer whose writes become `info` messages.
    fn info_writer(&self) -> Box<dyn Write + Send>;

    /// Warn the user.
    fn warn(&self, msg: &str);

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.warn(&args.to_string());
    }

    fn warn_writer(&self) -> Box<dyn Write + Send>;

    /// Report an error, with or without an error value.
    ///
    /// ```ignore
    /// output.error(Some(&err), "namespace could not be created");
    /// ```
    fn error(&self, err: ErrorRef<'_>, msg: &str);

    fn errorf(&self, err: ErrorRef<'_>, args: fmt::Arguments<'_>) {
        self.error(err, &args.to_string());
    }

    /// Writer whose writes become `error(None, ..)` messages.
    fn error_writer(&self) -> Box<dyn Write + Send>;

    /// Begin a long-running operation, ending any running one as a success.
    ///
    /// ```ignore
    /// output.start_operation("installing package");
    /// if let Err(err) = install_package() {
    ///     output.end_operation(false);
    ///     output.error(Some(&err), "");
    ///     return;
    /// }
    /// output.end_operation(true);
    /// ```
    fn start_operation(&self, status: &str);

    /// Like [`start_operation`](Self::start_operation), with a progress bar
    /// and elapsed time taken from `gauge`. The caller keeps updating the
    /// gauge while the operation runs.
    ///
    /// ```ignore
    /// let gauge = Arc::new(ProgressGauge::with_capacity("copying files", 10));
    /// output.start_operation_with_progress(gauge.clone());
    /// for file in files {
    ///     copy(file)?;
    ///     gauge.inc();
    /// }
    /// output.end_operation(true);
    /// ```
    fn start_operation_with_progress(&self, gauge: Arc<ProgressGauge>);

    /// End the running operation as a success or failure.
    fn end_operation(&self, success: bool) {
        self.end_operation_with_status(&EndOperationStatus::from(success));
    }

    /// End the running operation with any outcome marker, e.g.
    /// [`EndOperationStatus::skipped`].
    fn end_operation_with_status(&self, status: &EndOperationStatus);

    /// The result of a command, e.g. the listing produced by a `get`.
    fn result(&self, result: &str);

    /// Writer for command results, e.g. for a serializer.
    fn result_writer(&self) -> Box<dyn Write + Send>;

    /// A view at verbosity `level` (default 0). Messages from it are shown
    /// only if `level` does not exceed the ceiling set at construction.
    ///
    /// ```ignore
    /// output.v(1).info("verbose information");
    /// ```
    fn v(&self, level: i32) -> Box<dyn Output>;

    /// A view carrying additional structured context.
    ///
    /// ```ignore
    /// output.with_values(kv!["cluster" => name]).info("namespace created");
    /// ```
    fn with_values(&self, values: KeyValues) -> Box<dyn Output>;

    /// Whether messages at `level` would be shown.
    fn enabled(&self, level: i32) -> bool;
}

/// Renderer-independent error text: the message, the error, or both.
pub(crate) fn join_error(err: ErrorRef<'_>, msg: &str) -> String {
    match err {
        None => msg.to_string(),
        Some(err) if msg.is_empty() => err.to_string(),
        Some(err) => format!("{msg}: {err}"),
    }
}
