//! Run configuration.
//!
//! Everything has a default, so a config file is optional. Pass one with
//! `--config`:
//!
//! ```toml
//! # What to do when a source file does not exist:
//! #   "empty" writes a zero-length artifact and carries on
//! #   "error" aborts the run
//! missing_source = "empty"
//!
//! [diagnostics]
//! quiet = false   # suppress progress lines on stdout
//! ```
//!
//! Files are sparse. Set only what you want to change. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for one expansion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpandConfig {
    /// Policy for source files that don't exist.
    pub missing_source: MissingSource,
    /// Console output settings.
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSource {
    /// Write an empty artifact and report it.
    #[default]
    Empty,
    /// Fail the run.
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    pub quiet: bool,
}

/// Load a config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<ExpandConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Documented stock config, printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# rpm-scripts configuration
# All options are optional - defaults shown below.

# What to do when a source file does not exist:
#   "empty"  write a zero-length file to the destination and continue
#   "error"  abort the run
missing_source = "empty"

[diagnostics]
# Suppress progress lines on stdout. Errors are still reported.
quiet = false
"#
}
