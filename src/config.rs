//! Layered settings for hosts of the output engine.
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - a TOML file (`shellout.toml` in the working directory, or an explicit path)
//! - environment variables prefixed with `SHELLOUT_`
//! - command-line overrides applied by the host
//!
//! # Environment Variables
//!
//! - `SHELLOUT_VERBOSITY=2` sets `verbosity`
//! - `SHELLOUT_TERMINAL=plain` sets `terminal`
//! - `SHELLOUT_LOG_FILTER=shellout=trace` sets `log_filter`

use crate::error::{ShelloutError, ShelloutResult};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default settings file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "shellout.toml";

const ENV_PREFIX: &str = "SHELLOUT_";

/// Which renderer to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalMode {
    /// Probe the diagnostics stream
    #[default]
    Auto,
    /// Spinner and colors, whatever terminal detection says
    Interactive,
    /// Timestamped lines, whatever terminal detection says
    Plain,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Verbosity ceiling of the main output
    #[serde(default)]
    pub verbosity: i32,

    /// Renderer selection
    #[serde(default)]
    pub terminal: TerminalMode,

    /// Tracing directives for the logging bridge, e.g. `my_crate=debug`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    /// Route `tracing` events through the output
    #[serde(default = "default_false")]
    pub log_bridge: bool,
}

fn default_false() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbosity: 0,
            terminal: TerminalMode::default(),
            log_filter: None,
            log_bridge: default_false(),
        }
    }
}

impl Settings {
    /// Load settings from all sources, reading `shellout.toml` if present
    pub fn load() -> ShelloutResult<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings using a specific file. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> ShelloutResult<Self> {
        Self::figment(path.as_ref())
            .extract()
            .map_err(|e| ShelloutError::Config(Box::new(e)))
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Whether the logging bridge should be installed
    ///
    /// The bridge is forced on when the verbosity was given explicitly or a
    /// filter is configured.
    pub fn wants_log_bridge(&self, verbosity_given: bool) -> bool {
        self.log_bridge || verbosity_given || self.log_filter.is_some()
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> ShelloutResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save current settings to file
    pub fn save(&self, path: impl AsRef<Path>) -> ShelloutResult<()> {
        let path = path.as_ref();
        let write_err = |source| ShelloutError::ConfigWrite {
            path: PathBuf::from(path),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(write_err)
    }
}
