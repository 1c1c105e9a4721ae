//! Error types for the Wraith order pipeline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for Wraith operations.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the source file name, keeping any context already attached.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source));
        self
    }

    /// Creates a syntax error for the line where parsing stopped.
    #[must_use]
    pub fn syntax(line: u32, found: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax {
            line,
            found: found.into(),
            message: message.into(),
        })
    }

    /// Creates an error for a root rule that stopped short of the end of input.
    #[must_use]
    pub fn unconsumed_input(line: u32) -> Self {
        Self::new(ErrorKind::UnconsumedInput { line })
    }

    /// Creates an orbit range error.
    #[must_use]
    pub fn orbit_out_of_range(orbit: i64) -> Self {
        Self::new(ErrorKind::OrbitOutOfRange { orbit })
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config {
            message: message.into(),
        })
    }

    /// Returns the source line this error refers to, if any.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match &self.kind {
            ErrorKind::Syntax { line, .. } | ErrorKind::UnconsumedInput { line } => Some(*line),
            _ => self
                .context
                .as_ref()
                .and_then(|c| c.line)
                .and_then(|l| u32::try_from(l).ok()),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// No grammar rule accepted the input at this line.
    #[error("syntax error at line {line}: {message} (found {found})")]
    Syntax {
        /// Line number (1-indexed).
        line: u32,
        /// Description of the token where parsing stopped.
        found: String,
        /// Description of the failure.
        message: String,
    },

    /// The root rule succeeded without reaching end of input.
    #[error("not all tokens consumed: stopped at line {line}")]
    UnconsumedInput {
        /// Line of the first unconsumed token.
        line: u32,
    },

    /// Orbit outside the valid range.
    #[error("orbit {orbit} out of range 0..=10")]
    OrbitOutOfRange {
        /// The rejected orbit.
        orbit: i64,
    },

    /// Reading an input file failed.
    #[error("cannot read {path}: {message}")]
    Io {
        /// The path that was read.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// Settings could not be loaded.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the settings.
        message: String,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Stack of grammar rules active at the failure.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a rule frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
