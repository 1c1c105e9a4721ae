//! Lexer, token filters, and parse builder for Wraith order files.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of raw order-file bytes
//! - [`vocabulary`] - Game-domain word tables used to refine text tokens
//! - [`filter`] - Comment, space, and blank-line filters over token sequences
//! - [`Builder`] - A grammar-agnostic backtracking recursive-descent engine
//! - [`Tree`] and [`DebugTree`] - The parse tree and the rule trace it builds

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod debug_tree;
pub mod filter;
pub mod lexer;
pub mod token;
pub mod tree;
pub mod vocabulary;


pub use builder::{BuildOutcome, Builder, Terminal};
pub use debug_tree::{DebugLabel, DebugTree};
pub use lexer::{Lexer, tokenize};
pub use token::{Payload, Token, TokenKind};
pub use tree::Tree;
