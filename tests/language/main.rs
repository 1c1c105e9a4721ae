//! Integration tests for Layer 1: Language
//!
//! Tests for the lexer, token filters, and parse builder.

mod builder;
mod filters;
mod lexer;
