//! Order keywords.
//!
//! Every order line starts with one of these words. Top-level dispatch looks
//! at that single token and picks exactly one grammar rule.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use wraith_language::{Token, TokenKind};

/// The command word that starts an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Keyword {
    /// `assemble`
    Assemble,
    /// `bombard`
    Bombard,
    /// `buy`
    Buy,
    /// `disassemble`
    Disassemble,
    /// `invade`
    Invade,
    /// `move`
    Move,
    /// `name`
    Name,
    /// `news`
    News,
    /// `pay`
    Pay,
    /// `probe`
    Probe,
    /// `raid`
    Raid,
    /// `ration`
    Ration,
    /// `retool`
    Retool,
    /// `sell`
    Sell,
    /// `setup`
    Setup,
    /// `support`
    Support,
    /// `survey`
    Survey,
    /// `transfer`
    Transfer,
}

impl Keyword {
    /// Every keyword, in alphabetical order.
    pub const ALL: [Keyword; 18] = [
        Self::Assemble,
        Self::Bombard,
        Self::Buy,
        Self::Disassemble,
        Self::Invade,
        Self::Move,
        Self::Name,
        Self::News,
        Self::Pay,
        Self::Probe,
        Self::Raid,
        Self::Ration,
        Self::Retool,
        Self::Sell,
        Self::Setup,
        Self::Support,
        Self::Survey,
        Self::Transfer,
    ];

    /// Returns the keyword spelled by `word`, ignoring case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(word))
    }

    /// Returns the keyword a `TEXT` token spells, if any.
    #[must_use]
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind == TokenKind::Text {
            Self::from_word(&token.lexeme)
        } else {
            None
        }
    }

    /// Returns the lowercase spelling, which is also the grammar rule name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assemble => "assemble",
            Self::Bombard => "bombard",
            Self::Buy => "buy",
            Self::Disassemble => "disassemble",
            Self::Invade => "invade",
            Self::Move => "move",
            Self::Name => "name",
            Self::News => "news",
            Self::Pay => "pay",
            Self::Probe => "probe",
            Self::Raid => "raid",
            Self::Ration => "ration",
            Self::Retool => "retool",
            Self::Sell => "sell",
            Self::Setup => "setup",
            Self::Support => "support",
            Self::Survey => "survey",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
