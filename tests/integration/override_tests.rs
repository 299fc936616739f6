//! Integration tests for environment overrides
//!
//! Kept in their own test binary and in a single test, since they mutate
//! process environment.

use std::env;

use command_gate::config::{DISABLED_ENV, WARN_ONLY_ENV};
use command_gate::{CommandGate, Config, HookInput, Mode, OutputFormat, Response};

fn env_gate() -> CommandGate {
    CommandGate::new(&Config::default()).unwrap()
}

#[test]
fn test_environment_modes() {
    env::remove_var(DISABLED_ENV);
    env::remove_var(WARN_ONLY_ENV);

    let input = HookInput::bash("git push");

    // Default: enforced
    let gate = env_gate();
    assert_eq!(gate.mode(), Mode::Enforce);
    let decision = gate.check(&input);
    assert!(decision.is_block());
    let response = Response::render(&decision, gate.mode(), OutputFormat::ExitCode);
    assert_eq!(response.exit_code, 2);

    // Warn-only: still decided as block, but not enforced
    env::set_var(WARN_ONLY_ENV, "1");
    let gate = env_gate();
    assert_eq!(gate.mode(), Mode::WarnOnly);
    let decision = gate.check(&input);
    assert!(decision.is_block());
    let response = Response::render(&decision, gate.mode(), OutputFormat::ExitCode);
    assert_eq!(response.exit_code, 0);
    assert!(response.stderr.is_some());

    // Disabled wins over warn-only
    env::set_var(DISABLED_ENV, "1");
    let gate = env_gate();
    assert_eq!(gate.mode(), Mode::Disabled);
    assert!(gate.check(&input).is_allow());

    env::remove_var(DISABLED_ENV);
    env::remove_var(WARN_ONLY_ENV);
}
