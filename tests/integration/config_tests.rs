//! Integration tests for TOML-configured rule sets

use std::io::Write;

use command_gate::{CommandGate, Config, ConfigError, Mode};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn gate_from(content: &str) -> Result<CommandGate, ConfigError> {
    let file = write_config(content);
    let config = Config::load_from(file.path())?;
    Ok(CommandGate::new(&config)?.with_mode(Mode::Enforce))
}

#[test]
fn test_extra_rule_blocks() {
    let gate = gate_from(
        r#"
        [[rules]]
        id = "cargo-publish"
        pattern = ["cargo", "publish"]
        message = "Publishing crates is left to the user."
        "#,
    )
    .unwrap();

    let decision = gate.decide("cargo build && cargo publish");
    assert_eq!(decision.rule_id(), Some("cargo-publish"));
    assert_eq!(decision.reason(), Some("Publishing crates is left to the user."));

    // Built-ins still apply
    assert!(gate.decide("git push").is_block());
}

#[test]
fn test_disabled_builtin_rule() {
    let gate = gate_from(
        r#"
        [gate]
        disabled_rules = ["git-push"]
        "#,
    )
    .unwrap();

    assert!(gate.decide("git push").is_allow());
    assert!(gate.decide("npm install").is_block());
}

#[test]
fn test_builtin_rules_take_precedence_over_extra() {
    let gate = gate_from(
        r#"
        [[rules]]
        id = "any-git"
        pattern = ["git"]
        message = "no git"
        "#,
    )
    .unwrap();

    assert_eq!(gate.decide("git push").rule_id(), Some("git-push"));
    assert_eq!(gate.decide("git status").rule_id(), Some("any-git"));
}

#[test]
fn test_invalid_rule_rejected() {
    let err = gate_from(
        r#"
        [[rules]]
        id = "bad"
        pattern = ["git push"]
        message = "tokens cannot hold spaces"
        "#,
    )
    .err()
    .unwrap();

    assert!(matches!(err, ConfigError::InvalidRule { ref id, .. } if id == "bad"));
}

#[test]
fn test_unknown_disabled_rule_rejected() {
    let err = gate_from("[gate]\ndisabled_rules = [\"rm-rf\"]").err().unwrap();
    assert!(matches!(err, ConfigError::UnknownRule(_)));
}

#[test]
fn test_malformed_toml_rejected() {
    let err = gate_from("[[rules]\nid = ").err().unwrap();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let err = Config::load_from(std::path::Path::new("/nonexistent/command-gate.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_fail_open_setting() {
    let gate = gate_from("[general]\nfail_closed = false").unwrap();
    assert!(gate.unreadable("empty hook payload").is_allow());
}

#[test]
fn test_wrappers_setting() {
    let gate = gate_from(
        r#"
        [gate]
        wrappers = ["retry"]
        "#,
    )
    .unwrap();

    assert!(gate.decide("retry git push").is_block());
    // sudo is no longer a known wrapper
    assert!(gate.decide("sudo git push").is_allow());
}
