//! Token types for Wraith order files.
//!
//! Tokens are the output of the lexer and input to the parse builder.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A token from lexical analysis.
///
/// Tokens are produced once by the lexer and never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// 1-based source line.
    pub line: u32,
    /// The classified kind of this token.
    pub kind: TokenKind,
    /// Raw source text (empty for a synthesized `EOL` and for `EOF`).
    pub lexeme: String,
    /// The decoded value of this token.
    pub payload: Payload,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(line: u32, kind: TokenKind, lexeme: impl Into<String>, payload: Payload) -> Self {
        Self {
            line,
            kind,
            lexeme: lexeme.into(),
            payload,
        }
    }

    /// Creates an end-of-line token with no source text.
    #[must_use]
    pub fn eol(line: u32) -> Self {
        Self::new(line, TokenKind::Eol, "", Payload::None)
    }

    /// Creates an end-of-input token.
    #[must_use]
    pub fn eof(line: u32) -> Self {
        Self::new(line, TokenKind::Eof, "", Payload::None)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub fn integer(&self) -> Option<i64> {
        match self.payload {
            Payload::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the float payload, or the integer payload widened to a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn number(&self) -> Option<f64> {
        match self.payload {
            Payload::Float(f) => Some(f),
            Payload::Integer(n) => Some(n as f64),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the material name and tech level, if any.
    #[must_use]
    pub fn material(&self) -> Option<(&str, Option<u32>)> {
        match &self.payload {
            Payload::Material { name, tech_level } => Some((name, *tech_level)),
            _ => None,
        }
    }

    /// Returns true if this is a `TEXT` token whose text equals `word`, ignoring case.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Text && self.lexeme.eq_ignore_ascii_case(word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line;
        match self.kind {
            TokenKind::Eof => write!(f, "{{{line} $$}}"),
            TokenKind::Eol => write!(f, "{{{line} '\\n'}}"),
            TokenKind::Comma => write!(f, "{{{line} ','}}"),
            TokenKind::ParenOp => write!(f, "{{{line} '('}}"),
            TokenKind::ParenCl => write!(f, "{{{line} ')'}}"),
            TokenKind::Comment => write!(f, "{{{line} ;...}}"),
            TokenKind::Spaces => write!(f, "{{{line} ...}}"),
            TokenKind::Text => write!(f, "{{{line} {:?}}}", self.lexeme),
            TokenKind::QuotedText => write!(f, "{{{line} `{}`}}", self.text().unwrap_or("")),
            _ => write!(f, "{{{line} {}}}", self.lexeme),
        }
    }
}

/// The decoded value carried by a token.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Payload {
    /// Punctuation, delimiters, comments, and whitespace.
    None,
    /// Plain or quoted text.
    Text(String),
    /// Integers, percentages, and the number of a deposit or group id.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// A population role, resource, research, or product.
    Material {
        /// Canonical lowercase name.
        name: String,
        /// Tech level taken from a `-<n>` or `tl-<n>` suffix.
        tech_level: Option<u32>,
    },
}

/// Token kinds for Wraith order files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    // Structure
    /// End of input
    Eof,
    /// `\n`
    Eol,
    /// `,`
    Comma,
    /// `(`
    ParenOp,
    /// `)`
    ParenCl,
    /// `;` through end of line
    Comment,
    /// Run of whitespace other than newline
    Spaces,

    // Literals
    /// Integer literal like `42` or `-17`
    Integer,
    /// Float literal like `2.5`
    Float,
    /// Integer followed by `%`, like `50%`
    Percentage,
    /// Any other run of non-space characters
    Text,
    /// Text between double quotes
    QuotedText,

    // Domain
    /// Population role like `soldier`
    Population,
    /// Raw resource like `fuel`
    Resource,
    /// `research` or `tl-<n>`
    Research,
    /// Manufactured product like `factory-2`
    Product,
    /// Deposit id like `dp-12`
    DepositId,
    /// Factory group id like `fg-3`
    FactoryGroupId,
    /// Mine group id like `mg-7`
    MineGroupId,
}

impl TokenKind {
    /// Returns true if this token kind is dropped before parsing.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Spaces)
    }

    /// Returns the name used for this kind in grammars and traces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Eol => "EOL",
            Self::Comma => "COMMA",
            Self::ParenOp => "PARENOP",
            Self::ParenCl => "PARENCL",
            Self::Comment => "COMMENT",
            Self::Spaces => "SPACES",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Percentage => "PERCENTAGE",
            Self::Text => "TEXT",
            Self::QuotedText => "QUOTED_TEXT",
            Self::Population => "POPULATION",
            Self::Resource => "RESOURCE",
            Self::Research => "RESEARCH",
            Self::Product => "PRODUCT",
            Self::DepositId => "DEPOSIT_ID",
            Self::FactoryGroupId => "FACTORY_GROUP_ID",
            Self::MineGroupId => "MINE_GROUP_ID",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
