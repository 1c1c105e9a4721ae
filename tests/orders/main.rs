//! Integration tests for Layer 2: Orders
//!
//! Tests for the order grammar, the tree walker, and the full pipeline.

mod grammar;
mod pipeline;
mod walker;
