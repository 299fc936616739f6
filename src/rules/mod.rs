//! Forbidden command rules for command-gate
//!
//! A rule is a sequence of literal tokens that may not start a command,
//! plus the message shown when it does.

pub mod builtin;

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::config::{GateConfig, RuleConfig};
use crate::error::ConfigError;
use crate::parser::shell::is_separator;

/// A compile-time rule definition
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Tokens that must start a command for the rule to match
    pub pattern: &'static [&'static str],

    /// Human-readable reason for blocking
    pub message: &'static str,
}

impl RuleDef {
    /// Create a new rule definition
    pub const fn new(
        id: &'static str,
        pattern: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        Self {
            id,
            pattern,
            message,
        }
    }
}

/// A forbidden token sequence and its block message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub pattern: Vec<String>,
    pub message: String,
}

impl Rule {
    /// Create a new rule
    pub fn new<I, S>(id: impl Into<String>, pattern: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            pattern: pattern.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Check that the rule can ever match a tokenized command
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidRule {
            id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("rule id is empty".to_string()));
        }
        if self.pattern.is_empty() {
            return Err(invalid("pattern has no tokens".to_string()));
        }

        for token in &self.pattern {
            if token.is_empty() {
                return Err(invalid("pattern contains an empty token".to_string()));
            }
            if let Some(c) = token
                .chars()
                .find(|&c| c.is_whitespace() || is_separator(c) || matches!(c, '\'' | '"' | '\\'))
            {
                return Err(invalid(format!("token {:?} contains {:?}", token, c)));
            }
        }

        Ok(())
    }

    /// Check if the rule's tokens start the given command words
    ///
    /// Comparison is exact and case-sensitive.
    pub fn matches_command(&self, words: &[String]) -> bool {
        words.len() >= self.pattern.len()
            && self.pattern.iter().zip(words).all(|(token, word)| token == word)
    }
}

impl From<&RuleDef> for Rule {
    fn from(def: &RuleDef) -> Self {
        Rule::new(def.id, def.pattern.iter().copied(), def.message)
    }
}

impl From<&RuleConfig> for Rule {
    fn from(config: &RuleConfig) -> Self {
        Rule::new(
            config.id.clone(),
            config.pattern.iter().cloned(),
            config.message.clone(),
        )
    }
}

static BUILTIN: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    rules: builtin::BUILTIN_RULES.iter().map(Rule::from).collect(),
});

/// An ordered, immutable set of rules
///
/// Evaluation order is declaration order; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set, validating every rule and rejecting duplicate ids
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(ConfigError::DuplicateRule(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// The rules compiled into the binary
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    /// Built-in rules minus the disabled ones, followed by user rules
    pub fn from_config(gate: &GateConfig, extra: &[RuleConfig]) -> Result<Self, ConfigError> {
        let builtin = Self::builtin();

        for id in &gate.disabled_rules {
            if builtin.get(id).is_none() {
                return Err(ConfigError::UnknownRule(id.clone()));
            }
        }

        let rules = builtin
            .iter()
            .filter(|rule| !gate.disabled_rules.contains(&rule.id))
            .cloned()
            .chain(extra.iter().map(Rule::from))
            .collect();

        Self::new(rules)
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
