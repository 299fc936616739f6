//! Integration tests for command gating through the hook input path

use command_gate::{decide, CommandGate, Config, HookInput, Mode, RuleSet};

fn gate() -> CommandGate {
    CommandGate::new(&Config::default())
        .unwrap()
        .with_mode(Mode::Enforce)
}

fn check_bash(command: &str) -> bool {
    let json = format!(
        r#"{{"tool_name":"Bash","tool_input":{{"command":"{}"}}}}"#,
        command
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\t', "\\t")
    );
    let input = HookInput::from_json(&json).unwrap();
    gate().check(&input).is_allow()
}

// ============================================================================
// Boundary Matching
// ============================================================================

#[test]
fn test_git_push_blocked() {
    assert!(!check_bash("git push"));
    assert!(!check_bash("git push origin main"));
    assert!(!check_bash("git push --force-with-lease"));
}

#[test]
fn test_git_push_after_separator_blocked() {
    assert!(!check_bash("cd /tmp && git push"));
    assert!(!check_bash("cd x; git push"));
    assert!(!check_bash("make || git push"));
    assert!(!check_bash("git add . &git push"));
    assert!(!check_bash("git status\ngit push"));
}

#[test]
fn test_npm_rules() {
    assert!(!check_bash("npm install left-pad"));
    assert!(!check_bash("npm i -D typescript"));
    assert!(!check_bash("npm ci"));
    assert!(check_bash("pnpm install left-pad"));
    assert!(check_bash("npm run build"));
    assert!(check_bash("npm test"));
}

#[test]
fn test_exact_token_equality() {
    assert!(check_bash("git pushup"));
    assert!(check_bash("echo npmsomething"));
    assert!(check_bash("gitpush"));
    assert!(check_bash("git status"));
}

#[test]
fn test_not_at_command_position() {
    assert!(check_bash("echo git push"));
    assert!(check_bash("man git push"));
    assert!(check_bash("grep -r 'x' . git push"));
}

#[test]
fn test_compound_command_bodies_blocked() {
    assert!(!check_bash("if true; then git push; fi"));
    assert!(!check_bash("{ git push; }"));
    assert!(!check_bash("! git push"));
    assert!(!check_bash("for x in a b; do npm install; done"));
    assert!(!check_bash("(cd app && git push)"));
    assert!(check_bash("if true; then echo \"git push\"; fi"));
}

#[test]
fn test_case_sensitive() {
    assert!(check_bash("GIT PUSH"));
    assert!(check_bash("Git push"));
}

#[test]
fn test_whitespace_collapses() {
    assert!(!check_bash("  git    push  "));
    assert!(!check_bash("git\t\tpush"));
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn test_quoted_commit_message_allowed() {
    assert!(check_bash(r#"git commit -m "please git push later""#));
    assert!(check_bash("git commit -m 'then npm install'"));
    assert!(check_bash(r#"echo "a; git push""#));
}

#[test]
fn test_quoted_then_real_command_blocked() {
    assert!(!check_bash(r#"git commit -m "wip" && git push"#));
    assert!(!check_bash("echo 'done'; npm install"));
}

#[test]
fn test_unterminated_quote_does_not_crash() {
    assert!(check_bash("echo 'never closed; git push"));
    assert!(check_bash(r#"echo "never closed && git push"#));
    assert!(!check_bash("git push 'never closed"));
}

// ============================================================================
// Wrappers
// ============================================================================

#[test]
fn test_wrapped_commands_blocked() {
    assert!(!check_bash("sudo git push"));
    assert!(!check_bash("env CI=1 npm install"));
    assert!(!check_bash("HUSKY=0 git push"));
    assert!(!check_bash("timeout 30 git push"));
    assert!(!check_bash("/usr/bin/git push"));
    assert!(!check_bash("cd app && nohup npm ci"));
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_empty_command_allowed() {
    assert!(check_bash(""));
    assert!(check_bash("   "));
    assert!(check_bash(";;"));
}

#[test]
fn test_block_reason_surfaced() {
    let decision = gate().check(&HookInput::bash("npm install left-pad"));
    assert_eq!(decision.rule_id(), Some("npm-install"));
    assert!(decision.reason().unwrap().contains("pnpm"));
}

#[test]
fn test_decision_is_pure() {
    let gate = gate();
    for command in ["git push", "ls", r#"echo "git push""#, ""] {
        assert_eq!(gate.decide(command), gate.decide(command));
    }
}

#[test]
fn test_plain_decide_matches_gate_without_wrappers() {
    let rules = RuleSet::builtin().as_slice();
    assert!(decide("git push", rules).is_block());
    assert!(decide("cd /tmp && git push", rules).is_block());
    assert!(decide(r#"git commit -m "please git push later""#, rules).is_allow());
    assert!(decide("", rules).is_allow());
}

#[test]
fn test_tamper_attempt_blocked() {
    let decision = gate().decide("COMMAND_GATE_DISABLED=1 git push");
    assert_eq!(decision.rule_id(), Some("gate-tamper"));
}

#[test]
fn test_non_bash_tools_pass_through() {
    let json = r#"{"tool_name":"Write","tool_input":{"file_path":"notes.md","content":"git push"}}"#;
    let input = HookInput::from_json(json).unwrap();
    assert!(gate().check(&input).is_allow());
}
