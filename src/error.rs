//! Error types for command-gate

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or building a rule set.
///
/// The gate itself never fails; these only surface at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A rule definition is unusable
    #[error("invalid rule '{id}': {message}")]
    InvalidRule { id: String, message: String },

    /// Two rules share an id
    #[error("duplicate rule id '{0}'")]
    DuplicateRule(String),

    /// `disabled_rules` names a rule that does not exist
    #[error("unknown rule id '{0}' in disabled_rules")]
    UnknownRule(String),
}
