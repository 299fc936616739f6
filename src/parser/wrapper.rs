//! Wrapper command detection and unwrapping
//!
//! Handles commands like sudo, timeout, env, etc. that run another command,
//! and leading `NAME=value` assignments, so the real command word can be found.

use std::collections::HashSet;

/// Default wrapper commands to look through
pub const DEFAULT_WRAPPERS: &[&str] = &[
    "sudo",
    "doas", // BSD sudo alternative
    "env",
    "timeout",
    "nice",
    "ionice",
    "nohup",
    "time",
    "command",
    "exec",
    "xargs",
    "watch",
    "strace",
    "unbuffer",
];

/// Reserved words after which the next word is a command
pub const RESERVED_WORDS: &[&str] = &["!", "{", "if", "then", "elif", "else", "while", "until", "do"];

/// Skip the reserved words opening a compound command
///
/// Example: `["then", "git", "push"]` -> `["git", "push"]`
pub fn skip_reserved(words: &[String]) -> &[String] {
    let skip = words
        .iter()
        .take_while(|word| RESERVED_WORDS.contains(&word.as_str()))
        .count();
    &words[skip..]
}

/// Check if a word is a shell variable assignment (`NAME=value`)
pub fn is_assignment(word: &str) -> bool {
    let Some((name, _)) = word.split_once('=') else {
        return false;
    };

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Base name of a command word (`/usr/bin/git` -> `git`)
pub fn command_name(word: &str) -> &str {
    word.rsplit('/').next().unwrap_or(word)
}

/// Strip assignments and wrapper prefixes from the front of a command
///
/// Example: `["sudo", "-u", "root", "FOO=1", "git", "push"]` -> `["git", "push"]`
///
/// Returns an empty slice when a wrapper has no inner command.
pub fn unwrap_command<'a>(words: &'a [String], wrappers: &HashSet<String>) -> &'a [String] {
    let mut rest = words;

    loop {
        while rest.first().is_some_and(|w| is_assignment(w)) {
            rest = &rest[1..];
        }

        let Some(first) = rest.first() else {
            return rest;
        };

        let name = command_name(first);
        if !wrappers.contains(name) {
            return rest;
        }

        let skip = wrapper_arg_count(name, &rest[1..]);
        rest = &rest[1 + skip..];
    }
}

/// Options that consume the following word, per wrapper
fn options_with_value(name: &str) -> &'static [&'static str] {
    match name {
        "sudo" | "doas" => &[
            "-u", "--user", "-g", "--group", "-C", "--close-from", "-h", "--host", "-p",
            "--prompt", "-D", "--chdir",
        ],
        "timeout" => &["-s", "--signal", "-k", "--kill-after"],
        "env" => &["-u", "--unset", "-C", "--chdir"],
        "nice" | "ionice" => &["-n", "-c", "-p"],
        "xargs" => &["-n", "-L", "-I", "-E", "-s", "-P", "-d", "-a"],
        "watch" => &["-n", "--interval"],
        "strace" => &["-o", "-e", "-p", "-s"],
        "exec" => &["-a"],
        _ => &[],
    }
}

/// Number of words between the wrapper name and the command it runs
fn wrapper_arg_count(name: &str, args: &[String]) -> usize {
    let takes_value = options_with_value(name);
    let mut idx = 0;

    while idx < args.len() {
        let arg = args[idx].as_str();

        if arg == "--" {
            return idx + 1;
        }

        if arg.len() > 1 && arg.starts_with('-') {
            idx += if takes_value.contains(&arg) { 2 } else { 1 };
        } else if name == "env" && arg.contains('=') {
            idx += 1;
        } else if name == "timeout" {
            // First non-option is the duration
            return (idx + 1).min(args.len());
        } else {
            return idx;
        }
    }

    args.len()
}
