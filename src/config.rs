//! Configuration loading for command-gate
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::parser::wrapper::DEFAULT_WRAPPERS;

/// Prefix shared by every environment variable the gate reads
pub const ENV_PREFIX: &str = "COMMAND_GATE_";

/// Environment variable that turns every decision into Allow
pub const DISABLED_ENV: &str = "COMMAND_GATE_DISABLED";

/// Environment variable that reports blocks without enforcing them
pub const WARN_ONLY_ENV: &str = "COMMAND_GATE_WARN_ONLY";

/// How decisions are enforced for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Blocks are enforced
    #[default]
    Enforce,

    /// Blocks are reported but the command proceeds
    WarnOnly,

    /// No checks run (decisions are still audited)
    Disabled,
}

impl Mode {
    /// Read the mode from the environment; disabled wins over warn-only
    pub fn from_env() -> Self {
        if env::var_os(DISABLED_ENV).is_some() {
            Mode::Disabled
        } else if env::var_os(WARN_ONLY_ENV).is_some() {
            Mode::WarnOnly
        } else {
            Mode::Enforce
        }
    }
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,

    /// Block when the hook payload cannot be read or parsed
    pub fail_closed: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.claude/command-gate/audit.jsonl".to_string()),
            fail_closed: true,
        }
    }
}

/// Gate behaviour configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Look through env assignments and wrapper commands before matching
    pub unwrap_wrappers: bool,

    /// Commands that run another command (sudo, env, timeout, ...)
    pub wrappers: Vec<String>,

    /// Ids of built-in rules to switch off
    pub disabled_rules: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            unwrap_wrappers: true,
            wrappers: DEFAULT_WRAPPERS.iter().map(|s| s.to_string()).collect(),
            disabled_rules: Vec::new(),
        }
    }
}

/// A user-defined rule from the `[[rules]]` array
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    pub id: String,
    pub pattern: Vec<String>,
    pub message: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub gate: GateConfig,
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/command-gate/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/command-gate/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Warning: {}: {}", path.display(), e),
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), if logging is on
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.claude/command-gate/audit.jsonl"
fail_closed = true

[gate]
unwrap_wrappers = true
wrappers = ["sudo", "doas", "env", "timeout", "nice", "ionice", "nohup", "time", "command", "exec", "xargs", "watch", "strace", "unbuffer"]
disabled_rules = []

# [[rules]]
# id = "cargo-publish"
# pattern = ["cargo", "publish"]
# message = "Publishing crates is left to the user."
"#;
