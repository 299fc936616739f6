//! Shell tokenization
//!
//! A heuristic scanner, not a shell parser. It knows about quotes, backslash
//! escapes, comments, the command separators `;`, `&`, `|` and newline, and
//! the grouping parentheses of subshells and `$(...)`, which also start a
//! new command.
//! Quoted regions are neutralized: their characters are dropped and only an
//! empty placeholder remains in the word they belonged to, so `"git" push`
//! lexes as `["", "push"]`. An unterminated quote swallows the rest of the
//! input. Heredocs, command substitution and nested quoting are not modelled.

/// Characters that end one command and start the next
pub const SEPARATORS: &[char] = &[';', '&', '|', '\n', '(', ')'];

/// Check if a character separates commands
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word with quoted content removed
    Word(String),

    /// One or more consecutive separators
    Separator,
}

/// Tokenize a command line into words and separators
pub fn tokenize(command: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    // A word exists once any character or quote has been seen, even if it
    // ends up empty (the placeholder left by `''` or `""`).
    let mut in_word = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                }
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '\\' => {
                            chars.next();
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '\\' => match chars.next() {
                // Line continuation
                Some('\n') => {}
                Some(escaped) => {
                    word.push(escaped);
                    in_word = true;
                }
                None => {
                    word.push('\\');
                    in_word = true;
                }
            },
            '#' if !in_word => {
                // Comment runs to end of line; the newline still separates
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            // Redirections: `>&`, `<&`, `&>`
            '&' if word.ends_with('>') || word.ends_with('<') || chars.peek() == Some(&'>') => {
                word.push(c);
                in_word = true;
            }
            c if is_separator(c) => {
                flush_word(&mut tokens, &mut word, &mut in_word);
                if !matches!(tokens.last(), Some(Token::Separator)) {
                    tokens.push(Token::Separator);
                }
            }
            c if c.is_whitespace() => flush_word(&mut tokens, &mut word, &mut in_word),
            c => {
                word.push(c);
                in_word = true;
            }
        }
    }

    flush_word(&mut tokens, &mut word, &mut in_word);
    tokens
}

fn flush_word(tokens: &mut Vec<Token>, word: &mut String, in_word: &mut bool) {
    if *in_word {
        tokens.push(Token::Word(std::mem::take(word)));
        *in_word = false;
    }
}

/// Split a command line into its individual commands
///
/// Each inner vector holds the words of one command; its first word sits at
/// a command boundary. Empty commands (`;;`, leading `&&`) are dropped.
pub fn split_commands(command: &str) -> Vec<Vec<String>> {
    let mut commands = Vec::new();
    let mut current = Vec::new();

    for token in tokenize(command) {
        match token {
            Token::Word(word) => current.push(word),
            Token::Separator => {
                if !current.is_empty() {
                    commands.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if !current.is_empty() {
        commands.push(current);
    }

    commands
}
