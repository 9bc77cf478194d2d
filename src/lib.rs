//! Leveled, structured, terminal-aware console output for command-line tools.
//!
//! - [`output`]: the [`Output`] contract, its two renderers and helpers
//! - [`logging`]: drive an output from `tracing` and `log` call sites
//! - [`term`]: terminal detection and process-wide setup
//! - [`config`]: layered settings

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod term;

// Explicit exports for better API clarity
pub use config::{Settings, TerminalMode};
pub use error::{ShelloutError, ShelloutResult};
pub use logging::{LogSink, OutputSink};
pub use output::{
    DiscardingOutput, EndOperationStatus, InteractiveShell, KeyValues, NonInteractiveShell,
    Output, ProgressGauge,
};
