//! Error types for the fallible edges of the crate.
//!
//! Rendering itself never fails: writer errors are swallowed by the
//! renderers. What can fail is loading settings and wiring the tracing
//! bridge, and those are described here using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration and logging setup
#[derive(Error, Debug)]
pub enum ShelloutError {
    /// Settings could not be extracted from defaults, file and environment
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Failed to write settings to '{path}': {source}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// An `EnvFilter` directive string did not parse
    #[error("Invalid log filter '{filter}': {reason}")]
    LogFilter { filter: String, reason: String },

    /// A global tracing subscriber or `log` logger was already set
    #[error("A global logger is already installed")]
    LoggingAlreadyInstalled,
}

impl ShelloutError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::ConfigWrite { .. } => "CONFIG_WRITE_ERROR",
            Self::ConfigSerialize(_) => "CONFIG_SERIALIZE_ERROR",
            Self::LogFilter { .. } => "LOG_FILTER_ERROR",
            Self::LoggingAlreadyInstalled => "LOGGING_ALREADY_INSTALLED",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Config(_) => vec![
                "Check shellout.toml for typos in keys and values",
                "Check SHELLOUT_* environment variables",
            ],
            Self::LogFilter { .. } => vec![
                "Use tracing directives such as 'info' or 'my_crate::module=debug'",
            ],
            Self::LoggingAlreadyInstalled => vec![
                "Install the logging bridge and the log facade once per process",
            ],
            _ => vec![],
        }
    }
}

/// Result type alias for configuration and logging setup
pub type ShelloutResult<T> = Result<T, ShelloutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let err = ShelloutError::LogFilter {
            filter: "=[".to_string(),
            reason: "bad directive".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid log filter '=[': bad directive");
        assert_eq!(err.status_code(), "LOG_FILTER_ERROR");
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_already_installed() {
        let err = ShelloutError::LoggingAlreadyInstalled;
        assert_eq!(err.status_code(), "LOGGING_ALREADY_INSTALLED");
    }
}
