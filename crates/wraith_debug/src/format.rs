//! Debug-trace formatters.
//!
//! Provides human-readable and JSON renderings of a rule trace.

use std::fmt::Write;

use wraith_language::DebugTree;
use wraith_language::debug_tree::fmt_label;

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting debug traces.
pub trait TraceFormatter {
    /// Formats one trace to a string.
    fn format(&self, tree: &DebugTree) -> String;

    /// Formats several traces.
    fn format_many(&self, trees: &[&DebugTree]) -> String {
        trees
            .iter()
            .map(|t| self.format(t))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats traces as an indented tree, one node per line.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Print successful rules as a single line without their children.
    pub collapse_successes: bool,
    /// Stop descending below this depth.
    pub max_depth: Option<usize>,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to collapse successful subtrees.
    #[must_use]
    pub fn collapse_successes(mut self) -> Self {
        self.collapse_successes = true;
        self
    }

    /// Builder method to limit the printed depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn write_node(&self, out: &mut String, tree: &DebugTree, depth: usize) {
        let _ = write!(out, "{}", "  ".repeat(depth));
        let _ = fmt_label(&tree.label, out);

        let collapsed = self.collapse_successes && tree.succeeded() && !tree.children.is_empty();
        let truncated = self.max_depth.is_some_and(|max| depth >= max) && !tree.children.is_empty();
        if collapsed || truncated {
            let _ = write!(out, " ... (+{})", tree.node_count() - 1);
        }
        out.push('\n');
        if collapsed || truncated {
            return;
        }

        for child in &tree.children {
            self.write_node(out, child, depth + 1);
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, tree: &DebugTree) -> String {
        let mut out = String::new();
        self.write_node(&mut out, tree, 0);
        out
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats traces as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print JSON.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|e| format!("{{\"error\":{:?}}}", e.to_string()))
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, tree: &DebugTree) -> String {
        self.render(tree)
    }

    fn format_many(&self, trees: &[&DebugTree]) -> String {
        self.render(trees)
    }
}

// =============================================================================
// Tests
// =============================================================================
