//! Debug trace tree recording every rule attempt and terminal match.
//!
//! Unlike the parse tree, the debug tree keeps failed attempts. It is a
//! diagnostic record only and is never walked into orders.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::token::Token;

/// What a debug node records.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DebugLabel {
    /// A rule attempt and whether it succeeded.
    Rule {
        /// Rule name.
        name: &'static str,
        /// Result passed to `exit`.
        result: bool,
    },
    /// A terminal match attempt.
    Match {
        /// Description of the expected token shape.
        expected: String,
        /// The token under the cursor, if any.
        found: Option<Token>,
        /// Whether the token was accepted.
        matched: bool,
    },
}

/// A node in the debug trace.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DebugTree {
    /// What this node records.
    pub label: DebugLabel,
    /// Nested attempts, in call order.
    pub children: Vec<DebugTree>,
}

impl DebugTree {
    /// Creates a rule node with no children.
    #[must_use]
    pub fn rule(name: &'static str, result: bool) -> Self {
        Self {
            label: DebugLabel::Rule { name, result },
            children: Vec::new(),
        }
    }

    /// Creates a match leaf.
    #[must_use]
    pub fn matched(expected: impl Into<String>, found: Option<Token>, matched: bool) -> Self {
        Self {
            label: DebugLabel::Match {
                expected: expected.into(),
                found,
                matched,
            },
            children: Vec::new(),
        }
    }

    /// Returns the rule name, or `None` for a match leaf.
    #[must_use]
    pub fn rule_name(&self) -> Option<&'static str> {
        match self.label {
            DebugLabel::Rule { name, .. } => Some(name),
            DebugLabel::Match { .. } => None,
        }
    }

    /// Returns true if the attempt recorded here succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match self.label {
            DebugLabel::Rule { result, .. } => result,
            DebugLabel::Match { matched, .. } => matched,
        }
    }

    /// Returns the direct children that are rule attempts.
    pub fn rules(&self) -> impl Iterator<Item = &DebugTree> {
        self.children.iter().filter(|c| c.rule_name().is_some())
    }

    /// Returns the first descendant rule node with the given name, depth first.
    #[must_use]
    pub fn find_rule(&self, name: &str) -> Option<&DebugTree> {
        if self.rule_name() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_rule(name))
    }

    /// Counts the successful terminal matches directly under this node.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.children
            .iter()
            .filter(|c| matches!(c.label, DebugLabel::Match { matched: true, .. }))
            .count()
    }

    /// Counts every node in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DebugTree::node_count).sum::<usize>()
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(f, "{pad}")?;
        fmt_label(&self.label, f)?;
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Writes one label on a single line, as `rule(true)` or `{1 "word"} = "word"`.
///
/// # Errors
/// Propagates formatter errors.
pub fn fmt_label(label: &DebugLabel, f: &mut impl fmt::Write) -> fmt::Result {
    match label {
        DebugLabel::Rule { name, result } => write!(f, "{name}({result})"),
        DebugLabel::Match {
            expected,
            found,
            matched,
        } => {
            let op = if *matched { "=" } else { "!=" };
            match found {
                Some(token) => write!(f, "{token} {op} {expected}"),
                None => write!(f, "<none> {op} {expected}"),
            }
        }
    }
}

impl fmt::Display for DebugLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_label(self, f)
    }
}

impl fmt::Display for DebugTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
