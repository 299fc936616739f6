//! JSONL audit logging for command-gate
//!
//! Records every hook decision to a JSONL file for later analysis. The log
//! is write-only; the gate never reads it back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::Mode;
use crate::input::HookInput;
use crate::output::Decision;
use crate::redact::redact_secrets;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Warn,
    Disabled,
    Error,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    /// Tool that was invoked
    pub tool: String,

    /// Rule ID that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Redacted, truncated summary of the input
    pub input_summary: String,

    /// Purpose the model gave for the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from input and decision
    pub fn new(input: &HookInput, decision: &Decision, mode: Mode) -> Self {
        let (level, rule_id, reason) = match (mode, decision) {
            (Mode::Disabled, _) => (LogLevel::Disabled, None, "COMMAND_GATE_DISABLED".to_string()),
            (_, Decision::Allow) => (LogLevel::Allowed, None, "no rule matched".to_string()),
            (Mode::WarnOnly, Decision::Block { rule_id, reason }) => {
                (LogLevel::Warn, Some(rule_id.clone()), reason.clone())
            }
            (Mode::Enforce, Decision::Block { rule_id, reason }) => {
                (LogLevel::Blocked, Some(rule_id.clone()), reason.clone())
            }
        };

        Self {
            timestamp: Utc::now(),
            level,
            tool: input.tool_name.clone(),
            rule_id,
            input_summary: input.summary(),
            description: input.description().map(redact_secrets),
            reason,
            session_id: input.session_id.clone(),
            cwd: input.cwd.clone(),
        }
    }

    /// Create an entry for a payload that could not be read
    pub fn unreadable(error: &str, decision: &Decision) -> Self {
        Self {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            tool: "unknown".to_string(),
            rule_id: decision.rule_id().map(String::from),
            input_summary: String::new(),
            description: None,
            reason: redact_secrets(error),
            session_id: None,
            cwd: None,
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Warning: Failed to create {}: {}", parent.display(), e);
                }
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .map_err(|e| eprintln!("Warning: Failed to open audit log {}: {}", p.display(), e))
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a decision
    pub fn log_decision(
        &mut self,
        input: &HookInput,
        decision: &Decision,
        mode: Mode,
    ) -> Result<(), std::io::Error> {
        self.log(&AuditEntry::new(input, decision, mode))
    }
}
