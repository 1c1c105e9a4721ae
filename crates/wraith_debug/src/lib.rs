//! Debug-trace tooling for Wraith.
//!
//! This crate provides:
//! - [`TraceFormatter`] - Rendering a [`DebugTree`](wraith_language::DebugTree) as text or JSON
//! - [`nearest_miss`] - The failed rule attempt that came closest to matching

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod explain;
pub mod format;

pub use explain::{NearMiss, nearest_miss};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
