//! Walker and pipeline errors.

#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

use wraith_language::DebugTree;

/// A structural or range problem found while walking one order.
///
/// Walk errors never abort the walk. They are attached to the order they
/// were found in and collected for the whole file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum WalkError {
    /// A required child was absent.
    #[error("line {line}: {rule}: missing {expected}")]
    Missing {
        /// Order line.
        line: u32,
        /// Rule being walked.
        rule: &'static str,
        /// What was expected at that position.
        expected: String,
    },

    /// A child was present but of the wrong kind.
    #[error("line {line}: {rule}: expected {expected}, found {found}")]
    WrongKind {
        /// Order line.
        line: u32,
        /// Rule being walked.
        rule: &'static str,
        /// What was expected at that position.
        expected: String,
        /// What was there instead.
        found: String,
    },

    /// A numeric field was outside its allowed range.
    #[error("line {line}: {field} {value} out of range {min}..={max}")]
    OutOfRange {
        /// Order line.
        line: u32,
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: i64,
        /// Smallest allowed value.
        min: i64,
        /// Largest allowed value.
        max: i64,
    },

    /// Children were left over after the last expected one.
    #[error("line {line}: {rule}: unexpected trailing input")]
    Trailing {
        /// Order line.
        line: u32,
        /// Rule being walked.
        rule: &'static str,
    },

    /// A node that is not an order appeared where one was expected.
    #[error("line {line}: expected an order, found {found}")]
    UnexpectedNode {
        /// Line of the node.
        line: u32,
        /// What was found.
        found: String,
    },
}

impl WalkError {
    /// Returns the line this error refers to.
    #[must_use]
    pub fn line(&self) -> u32 {
        match self {
            Self::Missing { line, .. }
            | Self::WrongKind { line, .. }
            | Self::OutOfRange { line, .. }
            | Self::Trailing { line, .. }
            | Self::UnexpectedNode { line, .. } => *line,
        }
    }
}

/// A parse that produced no orders.
///
/// In fail-fast mode the debug trace is always attached so the caller can
/// see how far each rule got.
#[derive(Clone, Debug, Error)]
#[error("{error}")]
pub struct ParseFailure {
    /// What went wrong.
    pub error: wraith_foundation::Error,
    /// The rule trace, if one was kept.
    pub debug_tree: Option<DebugTree>,
}

impl ParseFailure {
    /// Creates a failure with the given error and trace.
    #[must_use]
    pub fn new(error: wraith_foundation::Error, debug_tree: Option<DebugTree>) -> Self {
        Self { error, debug_tree }
    }

    /// Returns the line the parse stopped at, if known.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.error.line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_error_messages() {
        let err = WalkError::OutOfRange {
            line: 4,
            field: "pct_committed",
            value: 150,
            min: 0,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "line 4: pct_committed 150 out of range 0..=100"
        );
        assert_eq!(err.line(), 4);

        let err = WalkError::Missing {
            line: 2,
            rule: "bombard",
            expected: "PERCENTAGE".into(),
        };
        assert!(err.to_string().contains("missing PERCENTAGE"));
    }

    #[test]
    fn parse_failure_reports_line() {
        let failure = ParseFailure::new(wraith_foundation::Error::syntax(1, "x", "no rule"), None);
        assert_eq!(failure.line(), Some(1));
        assert!(failure.to_string().contains("line 1"));
    }
}
