//! The `check` command: parse one order file and report on it.

use std::fmt::Write;
use std::path::Path;

use serde_json::{Value, json};
use tracing::info;

use wraith_debug::{HumanFormatter, TraceFormatter, nearest_miss};
use wraith_foundation::{Error, Result};
use wraith_orders::{ParseConfig, ParseFailure, Parsed, parse};

/// How a report is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per order, then errors.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// The outcome of checking one order file.
#[derive(Debug)]
pub struct Report {
    /// File name shown in messages.
    pub source: String,
    /// What the pipeline returned.
    pub outcome: std::result::Result<Parsed, ParseFailure>,
    /// Whether to print the debug trace.
    pub show_trace: bool,
}

impl Report {
    /// Returns true if the file parsed with no walk errors and no unknown lines.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.outcome.as_ref().is_ok_and(Parsed::is_clean)
    }

    /// Process exit status: 0 when clean, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_clean())
    }

    /// Renders the report in the given format.
    #[must_use]
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => format!("{:#}", self.to_json()),
        }
    }

    /// Renders the report as text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match &self.outcome {
            Ok(parsed) => {
                for order in &parsed.orders {
                    let _ = writeln!(out, "{order}");
                }
                for err in &parsed.errors {
                    let _ = writeln!(out, "error: {err}");
                }
                let unknown = parsed.unknown_lines();
                if !unknown.is_empty() {
                    let lines: Vec<String> = unknown.iter().map(u32::to_string).collect();
                    let _ = writeln!(out, "unrecognized lines: {}", lines.join(", "));
                }
                let _ = writeln!(
                    out,
                    "{}: {} orders ({} valid), {} errors, {} unrecognized lines",
                    self.source,
                    parsed.orders.len() - unknown.len(),
                    parsed.valid_orders().count(),
                    parsed.errors.len(),
                    unknown.len()
                );
                if self.show_trace {
                    if let Some(trace) = &parsed.debug_tree {
                        out.push_str(&HumanFormatter::new().format(trace));
                    }
                }
            }
            Err(failure) => {
                let _ = writeln!(out, "{}: {}", self.source, failure.error);
                if let Some(context) = &failure.error.context {
                    let _ = write!(out, "{context}");
                }
                if let Some(trace) = &failure.debug_tree {
                    if let Some(miss) = nearest_miss(trace) {
                        let _ = writeln!(out, "hint: {miss}");
                    }
                    if self.show_trace {
                        out.push_str(&HumanFormatter::new().collapse_successes().format(trace));
                    }
                }
            }
        }
        out
    }

    /// Builds the JSON document for this report.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match &self.outcome {
            Ok(parsed) => {
                let errors: Vec<Value> = parsed
                    .errors
                    .iter()
                    .map(|e| json!({ "line": e.line(), "message": e.to_string() }))
                    .collect();
                let mut doc = json!({
                    "source": self.source,
                    "ok": true,
                    "clean": parsed.is_clean(),
                    "valid_orders": parsed.valid_orders().count(),
                    "unknown_lines": parsed.unknown_lines(),
                    "orders": parsed.orders,
                    "errors": errors,
                });
                if self.show_trace {
                    doc["trace"] = json!(parsed.debug_tree);
                }
                doc
            }
            Err(failure) => {
                let miss = failure.debug_tree.as_ref().and_then(nearest_miss);
                let mut doc = json!({
                    "source": self.source,
                    "ok": false,
                    "error": failure.error.to_string(),
                    "line": failure.line(),
                    "nearest_miss": miss.map(|m| json!({
                        "rule": m.rule,
                        "matched": m.matched,
                        "expected": m.expected,
                        "found": m.found,
                    })),
                });
                if self.show_trace {
                    doc["trace"] = json!(failure.debug_tree);
                }
                doc
            }
        }
    }
}

/// Checks order-file bytes already in memory.
#[must_use]
pub fn check_source(
    source: impl Into<String>,
    input: &[u8],
    config: &ParseConfig,
    show_trace: bool,
) -> Report {
    let source = source.into();
    let outcome = parse(input, config).map_err(|mut failure| {
        failure.error = failure.error.with_source(source.clone());
        failure
    });
    Report {
        source,
        outcome,
        show_trace,
    }
}

/// Reads and checks an order file.
///
/// # Errors
/// Returns an I/O error if the file cannot be read.
pub fn check_file(path: &Path, config: &ParseConfig, show_trace: bool) -> Result<Report> {
    let source = path.display().to_string();
    let input = std::fs::read(path).map_err(|e| Error::io(&source, &e))?;
    info!(path = %source, bytes = input.len(), "checking order file");
    Ok(check_source(source, &input, config, show_trace))
}
