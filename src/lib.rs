//! Wraith - Order-file checker for a play-by-mail space strategy game
//!
//! This crate re-exports all layers of the Wraith system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: wraith_runtime    - CLI, settings file, log subscriber
//! Layer 2: wraith_debug      - Trace formatters, near-miss diagnostics
//!          wraith_orders     - Grammar, keyword dispatch, orders, tree walker
//! Layer 1: wraith_language   - Lexer, token filters, parse builder, trees
//! Layer 0: wraith_foundation - Core types (Coordinates, Error)
//! ```

pub use wraith_debug as debug;
pub use wraith_foundation as foundation;
pub use wraith_language as language;
pub use wraith_orders as orders;
pub use wraith_runtime as runtime;
