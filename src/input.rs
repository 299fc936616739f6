//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON input from stdin that Claude Code sends to hooks.

use serde::Deserialize;

use crate::redact::redact_secrets;

/// Main input structure from Claude Code hooks
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read")
    pub tool_name: String,

    /// Tool-specific input parameters
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Working directory of the session
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Tool-specific input variants
#[derive(Debug, Clone)]
pub enum ToolInput {
    /// Shell command execution
    Bash {
        command: String,
        description: Option<String>,
    },

    /// Anything else - passed through
    Other { raw: serde_json::Value },
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        // A string "command" field marks a shell invocation
        if let Some(command) = value.get("command").and_then(|v| v.as_str()) {
            return Ok(ToolInput::Bash {
                command: command.to_string(),
                description: value
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(String::from),
            });
        }

        Ok(ToolInput::Other { raw: value })
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a Bash input for a command evaluated outside a hook
    pub fn bash(command: impl Into<String>) -> Self {
        HookInput {
            tool_name: "Bash".to_string(),
            tool_input: ToolInput::Bash {
                command: command.into(),
                description: None,
            },
            session_id: None,
            hook_event_name: None,
            cwd: None,
        }
    }

    /// The model's stated purpose for the command, if given
    pub fn description(&self) -> Option<&str> {
        match &self.tool_input {
            ToolInput::Bash { description, .. } => description.as_deref(),
            ToolInput::Other { .. } => None,
        }
    }

    /// Whether the tool is the shell tool, whatever its input looks like
    pub fn is_bash_tool(&self) -> bool {
        self.tool_name.eq_ignore_ascii_case("bash")
    }

    /// Get a summary of the input for logging
    ///
    /// Secrets are redacted over the whole command before truncation, so a
    /// token cut in half at the limit cannot slip past the patterns.
    pub fn summary(&self) -> String {
        match &self.tool_input {
            ToolInput::Bash { command, .. } => {
                format!("Bash: {}", truncate(&redact_secrets(command), 100))
            }
            ToolInput::Other { .. } => format!("{}: <no command>", self.tool_name),
        }
    }
}

/// Truncate on a character boundary
fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
