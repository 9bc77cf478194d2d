//! Leveled-logging adapter.
//!
//! Libraries that log through `tracing` can be redirected into an
//! [`Output`] once at startup:
//!
//! ```no_run
//! use shellout::logging::{self, OutputSink};
//! use shellout::output::{NonInteractiveShell, Output};
//! use std::io;
//! use std::sync::Arc;
//!
//! let output: Arc<dyn Output> = Arc::new(NonInteractiveShell::new(io::stdout(), io::stderr(), 1));
//! logging::install(Arc::new(OutputSink::new(output)), "debug")?;
//! # Ok::<(), shellout::error::ShelloutError>(())
//! ```
//!
//! Records of the `log` facade take a separate path, [`install_log_facade`],
//! so they can be routed even when no tracing subscriber is installed.
//!
//! [`Output`]: crate::output::Output

pub mod facade;
pub mod layer;
pub mod sink;

pub use facade::{SinkLogger, install_log_facade};
pub use layer::{OutputLayer, RecordedError, sink_level};
pub use sink::{LogSink, OutputSink};

use crate::error::{ShelloutError, ShelloutResult};
use std::sync::Arc;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{EnvFilter, Registry};

/// Subscriber built by [`subscriber`].
pub type BridgeSubscriber = Layered<OutputLayer, Layered<EnvFilter, Registry>>;

/// Default filter directive for a verbosity ceiling.
pub fn filter_for_verbosity(verbosity: i32) -> &'static str {
    match verbosity {
        i32::MIN..=0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Build a subscriber that forwards events accepted by `filter` to `sink`.
///
/// Useful with `tracing::subscriber::with_default` where a global
/// installation is not wanted.
pub fn subscriber(sink: Arc<dyn LogSink>, filter: &str) -> ShelloutResult<BridgeSubscriber> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| ShelloutError::LogFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })?;
    Ok(tracing_subscriber::registry()
        .with(env_filter)
        .with(OutputLayer::new(sink)))
}

/// Install the bridge as the global subscriber. Fails if one is already set.
///
/// The global `log` logger is left alone, see [`install_log_facade`].
pub fn install(sink: Arc<dyn LogSink>, filter: &str) -> ShelloutResult<()> {
    tracing::subscriber::set_global_default(subscriber(sink, filter)?)
        .map_err(|_| ShelloutError::LoggingAlreadyInstalled)?;
    tracing::debug!(filter, "logging bridge installed");
    Ok(())
}
