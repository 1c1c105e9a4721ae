//! Order grammar, typed orders, and the parse pipeline for Wraith.
//!
//! This crate provides:
//! - [`grammar`] - Recursive-descent rules for every order, driven by a [`Builder`](wraith_language::Builder)
//! - [`Keyword`] - The order keywords and their dispatch
//! - [`Order`] - Typed order commands
//! - [`walk`] - Parse tree to orders, with per-order [`WalkError`]s
//! - [`parse`] - The whole pipeline from bytes to orders

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod grammar;
pub mod keyword;
pub mod order;
pub mod parser;
pub mod walker;


pub use config::ParseConfig;
pub use error::{ParseFailure, WalkError};
pub use grammar::{GRAMMAR, GRAMMAR_VERSION};
pub use keyword::Keyword;
pub use order::{GroupRef, Material, Order, ProbeTarget, SetupAction, SetupKind, TransferItem};
pub use parser::{Parsed, parse, parse_tokens};
pub use walker::walk;
