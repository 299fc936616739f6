//! Built-in forbidden command rules
//!
//! Adding a rule here is a code change; per-user rules go in the config file.

use crate::rules::RuleDef;

/// Rules compiled into the binary, in evaluation order
pub const BUILTIN_RULES: &[RuleDef] = &[
    // Publishing is left to the user
    RuleDef::new(
        "git-push",
        &["git", "push"],
        "git push is not allowed here. Commit locally and ask the user to push.",
    ),
    // This setup uses pnpm
    RuleDef::new(
        "npm-install",
        &["npm", "install"],
        "npm install is not allowed. Use pnpm install instead.",
    ),
    RuleDef::new(
        "npm-i",
        &["npm", "i"],
        "npm i is not allowed. Use pnpm install instead.",
    ),
    RuleDef::new(
        "npm-ci",
        &["npm", "ci"],
        "npm ci is not allowed. Use pnpm install --frozen-lockfile instead.",
    ),
];
