//! Bash command gating
//!
//! The core decision: does any rule's token sequence start one of the
//! commands on this command line? Quoted text never counts as a command.

use std::collections::HashSet;

use crate::config::ENV_PREFIX;
use crate::output::Decision;
use crate::parser::shell;
use crate::parser::wrapper::{self, command_name, is_assignment};
use crate::rules::Rule;

/// Rule id used when a command tries to set the gate's own variables
pub const TAMPER_RULE_ID: &str = "gate-tamper";

/// Decide whether a command line may run
///
/// Pure function of its inputs: tokens are matched exactly at command
/// boundaries, rules are tried in order and the first match blocks.
pub fn decide(command: &str, rules: &[Rule]) -> Decision {
    let commands = shell::split_commands(command);
    let commands: Vec<&[String]> = commands.iter().map(Vec::as_slice).collect();
    first_match(rules, &commands, |_, _| false)
}

/// Check a command line the way the hook does
///
/// On top of [`decide`]: commands assigning `COMMAND_GATE_*` variables are
/// blocked, and reserved words opening a compound command (`then`, `do`,
/// `!`, `{`, ...) are skipped. With `wrappers`, assignments and wrapper
/// commands (`sudo`, `env`, `timeout`, ...) are looked through as well and
/// the command word is compared by basename.
pub fn check_command(
    command: &str,
    rules: &[Rule],
    wrappers: Option<&HashSet<String>>,
) -> Decision {
    let commands = shell::split_commands(command);

    if let Some(decision) = check_tamper(&commands) {
        return decision;
    }

    let commands: Vec<&[String]> = commands
        .iter()
        .map(|words| wrapper::skip_reserved(words))
        .collect();

    match wrappers {
        Some(wrappers) => first_match(rules, &commands, |rule, words| {
            matches_normalized(rule, wrapper::unwrap_command(words, wrappers))
        }),
        None => first_match(rules, &commands, |_, _| false),
    }
}

fn first_match<F>(rules: &[Rule], commands: &[&[String]], also: F) -> Decision
where
    F: Fn(&Rule, &[String]) -> bool,
{
    for rule in rules {
        let hit = commands
            .iter()
            .any(|words| rule.matches_command(words) || also(rule, words));
        if hit {
            return Decision::block(&rule.id, &rule.message);
        }
    }

    Decision::Allow
}

/// Match with the first word reduced to its basename
fn matches_normalized(rule: &Rule, words: &[String]) -> bool {
    let Some((first, rest)) = words.split_first() else {
        return false;
    };
    let Some((first_token, rest_tokens)) = rule.pattern.split_first() else {
        return false;
    };

    command_name(first) == first_token
        && rest.len() >= rest_tokens.len()
        && rest_tokens.iter().zip(rest).all(|(token, word)| token == word)
}

/// Block commands that assign any of the gate's own environment variables
fn check_tamper(commands: &[Vec<String>]) -> Option<Decision> {
    let tampering = commands.iter().flatten().any(|word| {
        is_assignment(word)
            && word
                .split_once('=')
                .is_some_and(|(name, _)| name.starts_with(ENV_PREFIX))
    });

    tampering.then(|| {
        Decision::block(
            TAMPER_RULE_ID,
            "Changing command-gate settings from within a command is not allowed",
        )
    })
}
