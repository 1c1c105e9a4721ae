//! Token stream filters applied between the lexer and the parse builder.
//!
//! Each filter is a pure function over a token sequence.

use crate::token::{Token, TokenKind};

/// Drops `COMMENT` tokens.
#[must_use]
pub fn remove_comments(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .cloned()
        .collect()
}

/// Drops `SPACES` tokens.
#[must_use]
pub fn remove_spaces(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Spaces)
        .cloned()
        .collect()
}

/// Collapses runs of `EOL` tokens into a single `EOL`.
///
/// An `EOL` is dropped when the previously kept token is also an `EOL`, so a
/// leading `EOL` survives and the final `EOL EOF` pair is never broken.
#[must_use]
pub fn collapse_empty_lines(tokens: &[Token]) -> Vec<Token> {
    let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let repeat = token.kind == TokenKind::Eol
            && kept.last().is_some_and(|t| t.kind == TokenKind::Eol);
        if !repeat {
            kept.push(token.clone());
        }
    }
    kept
}

/// Applies every filter the grammar expects, in order: comments, spaces,
/// then blank lines.
#[must_use]
pub fn prepare_for_parser(tokens: &[Token]) -> Vec<Token> {
    collapse_empty_lines(&remove_spaces(&remove_comments(tokens)))
}
