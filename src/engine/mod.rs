//! Command gate engine
//!
//! Holds the rule set and settings loaded at startup and routes hook
//! inputs to the bash checker.

pub mod bash;

use std::collections::HashSet;

use crate::config::{Config, Mode};
use crate::error::ConfigError;
use crate::input::{HookInput, ToolInput};
use crate::output::Decision;
use crate::rules::RuleSet;

/// Rule id used when the hook payload cannot be read
pub const UNREADABLE_RULE_ID: &str = "unreadable-input";

/// The main gate
pub struct CommandGate {
    rules: RuleSet,
    wrappers: Option<HashSet<String>>,
    fail_closed: bool,
    mode: Mode,
}

impl CommandGate {
    /// Create a gate from configuration; the mode comes from the environment
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let rules = RuleSet::from_config(&config.gate, &config.rules)?;

        Ok(Self {
            rules,
            wrappers: wrappers(config),
            fail_closed: config.general.fail_closed,
            mode: Mode::from_env(),
        })
    }

    /// Create a gate with the built-in rules and default settings
    pub fn builtin() -> Self {
        Self::with_builtin_rules(&Config::default())
    }

    /// Create a gate from the configured settings, but only the built-in rules
    ///
    /// Used when the configured rules are invalid.
    pub fn with_builtin_rules(config: &Config) -> Self {
        Self {
            rules: RuleSet::builtin().clone(),
            wrappers: wrappers(config),
            fail_closed: config.general.fail_closed,
            mode: Mode::from_env(),
        }
    }

    /// Override the enforcement mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Main entry point: check a hook input and return a decision
    pub fn check(&self, input: &HookInput) -> Decision {
        if self.mode == Mode::Disabled {
            return Decision::Allow;
        }

        match &input.tool_input {
            ToolInput::Bash { command, .. } => self.evaluate(command),
            // The shell tool without a usable command is a malformed payload
            ToolInput::Other { .. } if input.is_bash_tool() => {
                self.unreadable("Bash input has no command string")
            }
            ToolInput::Other { .. } => Decision::Allow,
        }
    }

    /// Check a single command line, honoring the mode
    pub fn evaluate(&self, command: &str) -> Decision {
        if self.mode == Mode::Disabled {
            return Decision::Allow;
        }
        self.decide(command)
    }

    /// Decide on a single command line, whatever the mode
    pub fn decide(&self, command: &str) -> Decision {
        bash::check_command(command, self.rules.as_slice(), self.wrappers.as_ref())
    }

    /// Decision for a payload that could not be read or parsed
    pub fn unreadable(&self, error: &str) -> Decision {
        if self.fail_closed {
            Decision::block(
                UNREADABLE_RULE_ID,
                format!("unable to parse command: {}", error),
            )
        } else {
            Decision::Allow
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Wrapper names to look through, if unwrapping is on
fn wrappers(config: &Config) -> Option<HashSet<String>> {
    config
        .gate
        .unwrap_wrappers
        .then(|| config.gate.wrappers.iter().cloned().collect())
}
