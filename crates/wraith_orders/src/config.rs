//! Parser configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options threaded through a single parse call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ParseConfig {
    /// Reject the whole file at the first line no rule accepts. When false,
    /// such lines become `Unknown` orders and parsing continues.
    pub stop_on_first_error: bool,
    /// Return the debug trace with successful parses too.
    pub emit_debug_trace: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            stop_on_first_error: true,
            emit_debug_trace: false,
        }
    }
}

impl ParseConfig {
    /// Creates the default fail-fast configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that recovers from unrecognized lines.
    #[must_use]
    pub fn recovering() -> Self {
        Self::default().with_stop_on_first_error(false)
    }

    /// Fail-fast configuration that always returns the debug trace.
    #[must_use]
    pub fn debug() -> Self {
        Self::default().with_emit_debug_trace(true)
    }

    /// Sets fail-fast or recovery mode.
    #[must_use]
    pub fn with_stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    /// Sets whether successful parses keep their debug trace.
    #[must_use]
    pub fn with_emit_debug_trace(mut self, emit: bool) -> Self {
        self.emit_debug_trace = emit;
        self
    }
}
