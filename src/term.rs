//! Terminal detection and output construction for hosts.
//!
//! A terminal is "smart" when it can take cursor movement and colors, which
//! is what the interactive renderer needs. Everything else gets the
//! line-oriented renderer.

use crate::config::{Settings, TerminalMode};
use crate::error::ShelloutResult;
use crate::logging::{self, LogSink, OutputSink};
use crate::output::{InteractiveShell, NonInteractiveShell, Output};
use is_terminal::IsTerminal;
use std::io::Write;
use std::sync::Arc;

/// Whether a terminal with these properties can render the spinner.
///
/// `os` is a `std::env::consts::OS` value, `lookup_env` returns the value of
/// an environment variable if it is set.
pub fn is_smart_terminal<F>(is_tty: bool, os: &str, lookup_env: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if !is_tty {
        return false;
    }
    let term = lookup_env("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }
    // Only Windows Terminal handles the escape codes reliably.
    if os == "windows" && lookup_env("WT_SESSION").is_none() {
        return false;
    }
    // Travis CI exposes a TTY that does not behave like one.
    if lookup_env("TRAVIS").as_deref() == Some("true")
        && lookup_env("HAS_JOSH_K_SEAL_OF_APPROVAL").as_deref() == Some("true")
    {
        return false;
    }
    // The suckless terminal mishandles the autowrap toggles.
    if term.starts_with("st-") {
        return false;
    }
    lookup_env("NO_COLOR").is_none()
}

/// Probe the process's stderr and environment.
pub fn stderr_is_smart() -> bool {
    is_smart_terminal(
        std::io::stderr().is_terminal(),
        std::env::consts::OS,
        |key| std::env::var(key).ok(),
    )
}

/// Build an output over the given streams, interactive if `smart`.
pub fn new_output<O, E>(
    results: O,
    diagnostics: E,
    verbosity: i32,
    smart: bool,
) -> Arc<dyn Output>
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    if smart {
        Arc::new(InteractiveShell::new(results, diagnostics, verbosity))
    } else {
        Arc::new(NonInteractiveShell::new(results, diagnostics, verbosity))
    }
}

/// Build an output and a second handle on it with an unbounded ceiling.
///
/// Both share streams, spinner and operation state, so messages sent through
/// the second one still take the line from a running animation.
pub fn new_output_with_bridge<O, E>(
    results: O,
    diagnostics: E,
    verbosity: i32,
    smart: bool,
) -> (Arc<dyn Output>, Arc<dyn Output>)
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    if smart {
        let output = InteractiveShell::new(results, diagnostics, verbosity);
        let bridge = output.with_verbosity(i32::MAX);
        (Arc::new(output), Arc::new(bridge))
    } else {
        let output = NonInteractiveShell::new(results, diagnostics, verbosity);
        let bridge = output.with_verbosity(i32::MAX);
        (Arc::new(output), Arc::new(bridge))
    }
}

fn resolve_smart(mode: TerminalMode) -> bool {
    match mode {
        TerminalMode::Auto => stderr_is_smart(),
        TerminalMode::Interactive => true,
        TerminalMode::Plain => false,
    }
}

/// Build the process-wide output on stdout and stderr and route library logs
/// into it.
///
/// Records of the `log` facade always go to the output one level up, so they
/// show with `-v 1`. The tracing bridge is installed only when the settings
/// ask for it. It uses a handle with an unbounded ceiling so that the filter
/// alone decides what library events are shown.
pub fn configure_output(
    settings: &Settings,
    verbosity_given: bool,
) -> ShelloutResult<Arc<dyn Output>> {
    let smart = resolve_smart(settings.terminal);
    let (output, bridge) = new_output_with_bridge(
        std::io::stdout(),
        std::io::stderr(),
        settings.verbosity,
        smart,
    );

    let log_sink: Arc<dyn LogSink> = Arc::new(OutputSink::new(Arc::clone(&output)));
    logging::install_log_facade(log_sink, 1)?;

    if settings.wants_log_bridge(verbosity_given) {
        let filter = settings
            .log_filter
            .clone()
            .unwrap_or_else(|| logging::filter_for_verbosity(settings.verbosity).to_string());
        logging::install(Arc::new(OutputSink::new(bridge)), &filter)?;
    }

    Ok(output)
}
