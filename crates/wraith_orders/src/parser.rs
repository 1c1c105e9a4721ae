//! Order-file pipeline.
//!
//! Orchestrates the full flow from raw bytes to typed orders:
//! tokenize, filter, build the parse tree, walk it.

use tracing::{debug, warn};

use wraith_foundation::Error;
use wraith_language::filter::prepare_for_parser;
use wraith_language::{Builder, DebugTree, Token, Tree, tokenize};

use crate::config::ParseConfig;
use crate::error::{ParseFailure, WalkError};
use crate::grammar;
use crate::order::Order;
use crate::walker::walk;

/// Everything a successful parse produced.
#[derive(Clone, Debug)]
pub struct Parsed {
    /// Orders in file order, including `Unknown` lines in recovery mode.
    pub orders: Vec<Order>,
    /// Every walk error, across all orders.
    pub errors: Vec<WalkError>,
    /// The parse tree the orders were walked from.
    pub parse_tree: Tree,
    /// The rule trace, if the config asked for it.
    pub debug_tree: Option<DebugTree>,
}

impl Parsed {
    /// Returns true if there were no walk errors and no unrecognized lines.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && !self.orders.iter().any(Order::is_unknown)
    }

    /// Returns the recognized orders that walked without errors.
    pub fn valid_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| !o.is_unknown() && o.is_valid())
    }

    /// Returns the line numbers of unrecognized lines.
    #[must_use]
    pub fn unknown_lines(&self) -> Vec<u32> {
        self.orders
            .iter()
            .filter(|o| o.is_unknown())
            .map(Order::line)
            .collect()
    }
}

/// Parses an order file.
///
/// # Errors
/// Returns a [`ParseFailure`] if the root rule rejects the file. In fail-fast
/// mode this happens at the first line no order rule accepts.
pub fn parse(input: &[u8], config: &ParseConfig) -> Result<Parsed, ParseFailure> {
    let tokens = tokenize(input);
    debug!(bytes = input.len(), tokens = tokens.len(), "tokenized order file");
    parse_tokens(&tokens, config)
}

/// Parses a token sequence as produced by the lexer.
///
/// Comments, spaces, and blank lines are filtered out first, so the lexer's
/// output can be passed as is.
///
/// # Errors
/// Returns a [`ParseFailure`] if the root rule rejects the tokens.
pub fn parse_tokens(tokens: &[Token], config: &ParseConfig) -> Result<Parsed, ParseFailure> {
    let tokens = prepare_for_parser(tokens);
    debug!(tokens = tokens.len(), "filtered tokens for parser");

    let mut builder = Builder::new(&tokens);
    grammar::orders(&mut builder, config);
    let outcome = builder.finish();

    let Some(parse_tree) = outcome.parse_tree else {
        let error = outcome
            .error
            .unwrap_or_else(|| Error::syntax(0, "", "root rule did not run"));
        debug!(line = error.line(), "order file rejected");
        return Err(ParseFailure::new(error, outcome.debug_tree));
    };

    let (orders, errors) = walk(&parse_tree);
    for order in orders.iter().filter(|o| o.is_unknown()) {
        warn!(line = order.line(), "skipped unrecognized line");
    }
    debug!(
        orders = orders.len(),
        errors = errors.len(),
        "walked parse tree"
    );

    Ok(Parsed {
        orders,
        errors,
        parse_tree,
        debug_tree: outcome.debug_tree.filter(|_| config.emit_debug_trace),
    })
}
