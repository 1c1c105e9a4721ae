//! Core types and errors for Wraith.
//!
//! This crate provides:
//! - [`Coordinates`] - A system location with an optional orbit
//! - [`Error`] - Rich error types with context
//! - [`Result`] - Result alias over [`Error`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coordinates;
pub mod error;

pub use coordinates::{Coordinates, MAX_ORBIT};
pub use error::{Error, ErrorContext, ErrorKind};

/// Result type alias using Wraith's error type.
pub type Result<T> = std::result::Result<T, Error>;
