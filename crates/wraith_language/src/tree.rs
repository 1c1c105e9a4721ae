//! Concrete parse tree produced by the builder.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::token::Token;

/// A parse tree node.
///
/// Terminals are always leaves; non-terminals carry the name of the rule that
/// produced them and the children it matched, in match order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Tree {
    /// A matched token.
    Terminal(Token),
    /// A successful rule and everything it matched.
    NonTerminal {
        /// Rule name.
        name: &'static str,
        /// Children in match order.
        children: Vec<Tree>,
    },
}

impl Tree {
    /// Returns the rule name, or `None` for a terminal.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Terminal(_) => None,
            Self::NonTerminal { name, .. } => Some(name),
        }
    }

    /// Returns the token, or `None` for a non-terminal.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Terminal(token) => Some(token),
            Self::NonTerminal { .. } => None,
        }
    }

    /// Returns the children (empty for a terminal).
    #[must_use]
    pub fn children(&self) -> &[Tree] {
        match self {
            Self::Terminal(_) => &[],
            Self::NonTerminal { children, .. } => children,
        }
    }

    /// Returns true if this is a non-terminal with the given name.
    #[must_use]
    pub fn is_rule(&self, rule: &str) -> bool {
        self.name() == Some(rule)
    }

    /// Returns the line of the first token under this node.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Terminal(token) => Some(token.line),
            Self::NonTerminal { children, .. } => children.iter().find_map(Tree::line),
        }
    }

    /// Returns every token under this node, left to right.
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::Terminal(token) => out.push(token),
            Self::NonTerminal { children, .. } => {
                for child in children {
                    child.collect_tokens(out);
                }
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            Self::Terminal(token) => writeln!(f, "{pad}{token}"),
            Self::NonTerminal { name, children } => {
                writeln!(f, "{pad}{name}")?;
                for child in children {
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
