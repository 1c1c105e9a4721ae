//! Command-line checker, settings, and logging for Wraith.
//!
//! This crate provides:
//! - [`Settings`] - TOML settings file with parser and log options
//! - [`check`] - Reading an order file and rendering the result as text or JSON
//! - [`init_logging`] - The stderr `tracing` subscriber used by the `wraith` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod check;
pub mod logging;
pub mod settings;

pub use check::{OutputFormat, Report, check_file, check_source};
pub use logging::init_logging;
pub use settings::{CONFIG_ENV, Settings};
