//! Decisions and hook responses
//!
//! Produces the exit status, stderr message and JSON output expected by
//! Claude Code hooks.

use serde::Serialize;

use crate::config::Mode;

/// Exit status telling the caller the command may run
pub const EXIT_PROCEED: u8 = 0;

/// Exit status telling the caller the command was blocked
pub const EXIT_BLOCKED: u8 = 2;

/// Decision result from the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The command may run
    Allow,

    /// The command is blocked
    Block { rule_id: String, reason: String },
}

impl Decision {
    /// Create a block decision
    pub fn block(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Decision::Block {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an allow decision
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Check if this is a block decision
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// Get the rule ID if blocked
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { rule_id, .. } => Some(rule_id),
        }
    }

    /// Get the block reason
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { reason, .. } => Some(reason),
        }
    }
}

/// How responses are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Exit status 2 plus the reason on stderr
    #[default]
    ExitCode,

    /// Hook JSON on stdout, always exit 0
    Json,
}

impl OutputFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exit-code" | "exit" => Some(OutputFormat::ExitCode),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// JSON output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// Always "deny"; allowing is signalled by omitting this block
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    /// Shown to the model so it can adjust the command
    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// Create an allow response (empty output = allow)
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    /// Create a deny response with rule ID and reason
    pub fn deny(rule_id: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: reason.to_string(),
            }),
            system_message: Some(format!("[command-gate:{}] Blocked: {}", rule_id, reason)),
        }
    }

    /// Create a warn response (allows but shows warning)
    pub fn warn(rule_id: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: Some(warning_message(rule_id, reason)),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn warning_message(rule_id: &str, reason: &str) -> String {
    format!("[command-gate:{}] Warning (not enforced): {}", rule_id, reason)
}

/// Everything the process writes for one decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub exit_code: u8,
}

impl Response {
    /// Translate a decision into output for the given mode and format
    pub fn render(decision: &Decision, mode: Mode, format: OutputFormat) -> Self {
        let blocked = match decision {
            Decision::Block { rule_id, reason } if mode != Mode::Disabled => {
                Some((rule_id.as_str(), reason.as_str()))
            }
            _ => None,
        };
        let enforce = mode == Mode::Enforce;

        match (format, blocked) {
            (OutputFormat::ExitCode, None) => Response::proceed(None, None),
            (OutputFormat::ExitCode, Some((_, reason))) if enforce => Response {
                stdout: None,
                stderr: Some(reason.to_string()),
                exit_code: EXIT_BLOCKED,
            },
            (OutputFormat::ExitCode, Some((rule_id, reason))) => {
                Response::proceed(None, Some(warning_message(rule_id, reason)))
            }
            (OutputFormat::Json, None) => Response::proceed(Some(HookOutput::allow().to_json()), None),
            (OutputFormat::Json, Some((rule_id, reason))) => {
                let output = if enforce {
                    HookOutput::deny(rule_id, reason)
                } else {
                    HookOutput::warn(rule_id, reason)
                };
                Response::proceed(Some(output.to_json()), None)
            }
        }
    }

    fn proceed(stdout: Option<String>, stderr: Option<String>) -> Self {
        Response {
            stdout,
            stderr,
            exit_code: EXIT_PROCEED,
        }
    }
}
