//! Secret redaction for audit records
//!
//! Commands often carry tokens inline (`curl -H "Authorization: ..."`,
//! `GITHUB_TOKEN=... gh ...`); these must not end up in the audit log.

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns for secrets that may appear in a command line
static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // API keys and tokens
        r"(?i)api[_-]?key\s*[=:]\s*['\x22]?[a-zA-Z0-9_\-]{16,}",
        r"(?i)secret[_-]?key\s*[=:]\s*['\x22]?[a-zA-Z0-9_\-]{16,}",
        r"(?i)access[_-]?token\s*[=:]\s*['\x22]?[a-zA-Z0-9_\-]{16,}",
        r"(?i)authorization:\s*(bearer|token|basic)\s+[a-zA-Z0-9_\-\.=/+]+",
        // AWS
        r"AKIA[0-9A-Z]{16}",
        r"(?i)aws[_-]?secret[_-]?access[_-]?key\s*[=:]\s*['\x22]?[0-9a-zA-Z/+]{20,}",
        // GitHub
        r"gh[pousr]_[A-Za-z0-9_]{36,}",
        r"github_pat_[A-Za-z0-9_]{22,}",
        // npm
        r"npm_[A-Za-z0-9]{36}",
        // Inline passwords
        r"(?i)(password|passwd|pwd)\s*[=:]\s*['\x22][^'\x22]+['\x22]",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redact secrets in text for logging
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();

    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, "[REDACTED]").into_owned();
    }

    redacted
}
