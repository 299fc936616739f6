//! command-gate - Pre-execution hook that blocks forbidden shell commands
//!
//! Receives a proposed shell command from a coding assistant, checks whether
//! any forbidden token sequence (`git push`, `npm install`, ...) starts one of
//! its commands, and answers allow or block with a reason.
//!
//! # Features
//!
//! - **Boundary matching**: rules only match at the start of a command, after
//!   `;`, `&`, `|` or a newline
//! - **Quote neutralization**: text inside quotes is never treated as a command
//! - **Wrapper detection**: looks through sudo, env, timeout, etc.
//! - **Configurable rules**: disable built-ins or add your own in TOML
//! - **Audit logging**: JSONL log of all decisions, secrets redacted
//!
//! # Example
//!
//! ```
//! use command_gate::{decide, RuleSet};
//!
//! let rules = RuleSet::builtin();
//! assert!(decide("cd /tmp && git push", rules.as_slice()).is_block());
//! assert!(decide(r#"git commit -m "git push later""#, rules.as_slice()).is_allow());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod redact;
pub mod rules;

// Re-exports for convenience
pub use config::{Config, Mode};
pub use engine::bash::decide;
pub use engine::CommandGate;
pub use error::ConfigError;
pub use input::{HookInput, ToolInput};
pub use output::{Decision, HookOutput, OutputFormat, Response};
pub use rules::{Rule, RuleSet};
