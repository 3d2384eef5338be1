//! Scanner for the `.genome` / `.code` text format.
//!
//! Both file dialects share one token set. Comments (`#` to end of line),
//! spaces/tabs and newlines are consumed but never emitted; newlines only
//! advance the line counter used in error messages.

use std::fmt;

use crate::errors::{GeneticsError, GeneticsResult};

/// A single token of the genome/code format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Command keyword, stored without the leading `.` (e.g. `genome`, `fenotipe`).
    Command(String),
    /// Identifier: letter followed by letters, digits or underscores.
    Ident(String),
    /// Double-quoted string, stored without the quotes.
    Str(String),
    /// The `@` wildcard ("don't care") marker.
    Wildcard,
}

impl Token {
    /// Token kind name, used in scan reports and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Command(_) => "COMMAND",
            Token::Ident(_) => "ID",
            Token::Str(_) => "STRING",
            Token::Wildcard => "WILDCARD",
        }
    }
}

impl fmt::Display for Token {
    /// Renders the source form of the token (`.genome`, `Name`, `"red"`, `@`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(name) => write!(f, ".{}", name),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Wildcard => write!(f, "@"),
        }
    }
}

/// Turn raw text into the flat token sequence.
///
/// Single left-to-right pass. Fails with [`GeneticsError::Syntax`] carrying
/// the offending character and its 1-based line when no token pattern
/// matches at the current position. Quoted strings are matched greedily up
/// to the last `"` on the same line; an unterminated quote reports the
/// quote character itself. Only spaces and tabs count as whitespace, so a
/// bare carriage return is rejected like any other stray character.
pub fn scan(text: &str) -> GeneticsResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut line = 1usize;

    while let Some(c) = rest.chars().next() {
        match c {
            ' ' | '\t' => rest = &rest[1..],
            '\n' => {
                line += 1;
                rest = &rest[1..];
            }
            '#' => {
                let end = rest.find('\n').unwrap_or(rest.len());
                rest = &rest[end..];
            }
            '"' => {
                let body = &rest[1..];
                let line_end = body.find('\n').unwrap_or(body.len());
                match body[..line_end].rfind('"') {
                    Some(close) => {
                        tokens.push(Token::Str(body[..close].to_string()));
                        rest = &body[close + 1..];
                    }
                    None => {
                        return Err(GeneticsError::Syntax {
                            fragment: '"'.to_string(),
                            line,
                        })
                    }
                }
            }
            '.' => {
                let body = &rest[1..];
                let len = body
                    .chars()
                    .take_while(|ch| ch.is_ascii_lowercase())
                    .count();
                if len == 0 {
                    return Err(GeneticsError::Syntax {
                        fragment: '.'.to_string(),
                        line,
                    });
                }
                tokens.push(Token::Command(body[..len].to_string()));
                rest = &body[len..];
            }
            '@' => {
                tokens.push(Token::Wildcard);
                rest = &rest[1..];
            }
            c if c.is_ascii_alphabetic() => {
                let len = rest
                    .chars()
                    .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
                    .count();
                tokens.push(Token::Ident(rest[..len].to_string()));
                rest = &rest[len..];
            }
            other => {
                return Err(GeneticsError::Syntax {
                    fragment: other.to_string(),
                    line,
                })
            }
        }
    }

    Ok(tokens)
}
