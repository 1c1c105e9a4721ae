//! Backtracking parse builder.
//!
//! The builder is a grammar-agnostic state machine over a fixed token slice.
//! Grammar rules bracket themselves with [`Builder::enter`] and
//! [`Builder::exit`] and consume input with [`Builder::match_terminal`]. A
//! rule that exits with `false` rewinds the cursor to where it entered and
//! discards what it matched. Every attempt, successful or not, is recorded in
//! the debug tree.
//!
//! ```text
//! enter("bombard")          push frame {start: cursor}
//!   match "bombard"         cursor += 1, child recorded
//!   match INTEGER           fails, cursor unchanged
//! exit(false)               cursor = start, children dropped
//! ```

use std::fmt;

use wraith_foundation::{Error, ErrorContext};

use crate::debug_tree::{DebugLabel, DebugTree};
use crate::token::{Token, TokenKind};
use crate::tree::Tree;

/// An expected token shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terminal {
    /// Required token kind.
    pub kind: TokenKind,
    /// Required text, compared case-insensitively.
    pub text: Option<&'static str>,
}

impl Terminal {
    /// Accepts any token of the given kind.
    #[must_use]
    pub const fn kind(kind: TokenKind) -> Self {
        Self { kind, text: None }
    }

    /// Accepts a `TEXT` token spelling `word`, ignoring case.
    #[must_use]
    pub const fn keyword(word: &'static str) -> Self {
        Self {
            kind: TokenKind::Text,
            text: Some(word),
        }
    }

    /// Returns true if `token` has this shape.
    #[must_use]
    pub fn accepts(&self, token: &Token) -> bool {
        token.kind == self.kind
            && self
                .text
                .is_none_or(|word| token.lexeme.eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text {
            Some(word) => write!(f, "{word:?}"),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// One open rule.
#[derive(Debug)]
struct Frame {
    name: &'static str,
    start: usize,
    children: Vec<Tree>,
    trace: Vec<DebugTree>,
}

/// The farthest point any terminal match failed at.
#[derive(Clone, Debug)]
struct Failure {
    index: usize,
    expected: String,
    rules: Vec<&'static str>,
}

/// Everything a finished build produced.
#[derive(Clone, Debug, Default)]
pub struct BuildOutcome {
    /// The parse tree, present only if the root rule succeeded at end of input.
    pub parse_tree: Option<Tree>,
    /// The debug tree, present once the root rule has exited.
    pub debug_tree: Option<DebugTree>,
    /// Why the build failed, if it did.
    pub error: Option<Error>,
}

impl BuildOutcome {
    /// Returns true if a parse tree was produced.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.parse_tree.is_some()
    }
}

/// Parse builder over a borrowed token slice.
#[derive(Debug)]
pub struct Builder<'t> {
    tokens: &'t [Token],
    /// Index of the next unconsumed token.
    current: usize,
    stack: Vec<Frame>,
    farthest: Option<Failure>,
    parse_tree: Option<Tree>,
    debug_tree: Option<DebugTree>,
    error: Option<Error>,
}

impl<'t> Builder<'t> {
    /// Creates a builder positioned at the first token.
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            stack: Vec::new(),
            farthest: None,
            parse_tree: None,
            debug_tree: None,
            error: None,
        }
    }

    /// Opens a rule frame at the current cursor position.
    pub fn enter(&mut self, name: &'static str) {
        self.stack.push(Frame {
            name,
            start: self.current,
            children: Vec::new(),
            trace: Vec::new(),
        });
    }

    /// Closes the innermost rule frame and returns the rule's final result.
    ///
    /// On failure the cursor rewinds to the frame's start. On success the
    /// frame becomes a child of its parent, or, for the root frame, the parse
    /// tree. The root only succeeds if no input other than `EOF` remains.
    ///
    /// # Panics
    /// Panics if no rule frame is open.
    pub fn exit(&mut self, success: bool) -> bool {
        let Some(frame) = self.stack.pop() else {
            panic!("builder exit() called without a matching enter()");
        };

        let tree = if success {
            Some(Tree::NonTerminal {
                name: frame.name,
                children: frame.children,
            })
        } else {
            self.current = frame.start;
            None
        };

        if let Some(parent) = self.stack.last_mut() {
            if let Some(tree) = tree {
                parent.children.push(tree);
            }
            parent.trace.push(DebugTree {
                label: DebugLabel::Rule {
                    name: frame.name,
                    result: success,
                },
                children: frame.trace,
            });
            return success;
        }

        let result = self.close_root(tree, frame.start);
        self.debug_tree = Some(DebugTree {
            label: DebugLabel::Rule {
                name: frame.name,
                result,
            },
            children: frame.trace,
        });
        result
    }

    /// Runs `body` inside a rule frame named `name`.
    pub fn rule<F>(&mut self, name: &'static str, body: F) -> bool
    where
        F: FnOnce(&mut Self) -> bool,
    {
        self.enter(name);
        let ok = body(self);
        self.exit(ok)
    }

    /// Returns the token `offset` positions from the cursor, or `None` past
    /// either end. `peek(0)` is the next unconsumed token.
    ///
    /// # Panics
    /// Panics if no rule frame is open.
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&'t Token> {
        self.assert_open("peek");
        let index = self.current.checked_add_signed(offset)?;
        self.tokens.get(index)
    }

    /// Returns true if the token at `offset` has the given kind.
    #[must_use]
    pub fn check(&self, kind: TokenKind, offset: isize) -> bool {
        self.peek(offset).is_some_and(|t| t.kind == kind)
    }

    /// Returns true if the token at `offset` is the given keyword.
    #[must_use]
    pub fn check_keyword(&self, word: &str, offset: isize) -> bool {
        self.peek(offset).is_some_and(|t| t.is_keyword(word))
    }

    /// Matches the next token against `terminal`, consuming it on success.
    ///
    /// # Panics
    /// Panics if no rule frame is open.
    pub fn match_terminal(&mut self, terminal: Terminal) -> bool {
        self.assert_open("match");
        let found = self.token_at(self.current);
        let matched = found.is_some_and(|t| terminal.accepts(t));
        self.record(terminal.to_string(), found, matched);
        matched
    }

    /// Matches any token of `kind`.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        self.match_terminal(Terminal::kind(kind))
    }

    /// Matches the keyword `word`.
    pub fn match_keyword(&mut self, word: &'static str) -> bool {
        self.match_terminal(Terminal::keyword(word))
    }

    /// Matches the first of `kinds` the next token has.
    pub fn match_any_of(&mut self, kinds: &[TokenKind]) -> bool {
        match kinds.iter().find(|&&k| self.check(k, 0)) {
            Some(&kind) => self.match_kind(kind),
            None => {
                let expected = kinds
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(" | ");
                let found = self.token_at(self.current);
                self.record(expected, found, false);
                false
            }
        }
    }

    /// Consumes the next token whatever it is, unless input is exhausted.
    ///
    /// # Panics
    /// Panics if no rule frame is open.
    pub fn advance(&mut self) -> bool {
        self.assert_open("advance");
        let found = self.token_at(self.current);
        self.record("ANY".to_string(), found, found.is_some());
        found.is_some()
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    /// Returns true if only `EOF` (or nothing) remains.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.token_at(self.current)
            .is_none_or(|t| t.kind == TokenKind::Eof)
    }

    /// Returns the token at the farthest position a match failed.
    #[must_use]
    pub fn farthest_failure(&self) -> Option<&'t Token> {
        self.farthest.as_ref().and_then(|f| self.token_at(f.index))
    }

    /// Returns the parse tree once the root rule has succeeded.
    #[must_use]
    pub fn parse_tree(&self) -> Option<&Tree> {
        self.parse_tree.as_ref()
    }

    /// Returns the debug tree once the root rule has exited.
    #[must_use]
    pub fn debug_tree(&self) -> Option<&DebugTree> {
        self.debug_tree.as_ref()
    }

    /// Returns the build error, if the root rule failed.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Consumes the builder, returning its outputs.
    #[must_use]
    pub fn finish(self) -> BuildOutcome {
        BuildOutcome {
            parse_tree: self.parse_tree,
            debug_tree: self.debug_tree,
            error: self.error,
        }
    }

    fn close_root(&mut self, tree: Option<Tree>, start: usize) -> bool {
        match tree {
            Some(tree) if self.at_end() => {
                self.parse_tree = Some(tree);
                true
            }
            Some(_) => {
                self.error = Some(Error::unconsumed_input(self.line_at(self.current)));
                self.current = start;
                false
            }
            None => {
                self.error = Some(self.syntax_error());
                false
            }
        }
    }

    fn token_at(&self, index: usize) -> Option<&'t Token> {
        self.tokens.get(index)
    }

    fn assert_open(&self, op: &str) {
        assert!(
            !self.stack.is_empty(),
            "builder {op}() called outside of any rule"
        );
    }

    fn record(&mut self, expected: String, found: Option<&'t Token>, matched: bool) {
        if matched {
            if let Some(token) = found {
                self.current += 1;
                if let Some(frame) = self.stack.last_mut() {
                    frame.children.push(Tree::Terminal(token.clone()));
                }
            }
        } else if self.farthest.as_ref().is_none_or(|f| self.current > f.index) {
            self.farthest = Some(Failure {
                index: self.current,
                expected: expected.clone(),
                rules: self.stack.iter().map(|f| f.name).collect(),
            });
        }
        if let Some(frame) = self.stack.last_mut() {
            frame
                .trace
                .push(DebugTree::matched(expected, found.cloned(), matched));
        }
    }

    fn line_at(&self, index: usize) -> u32 {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn syntax_error(&self) -> Error {
        let index = self.farthest.as_ref().map_or(self.current, |f| f.index);
        let found = self
            .tokens
            .get(index)
            .map_or_else(|| "end of input".to_string(), ToString::to_string);
        let line = self.line_at(index);
        let Some(failure) = &self.farthest else {
            return Error::syntax(line, found, "no rule matches");
        };

        let mut context = ErrorContext::new().with_line(line as usize);
        for rule in failure.rules.iter().rev() {
            context = context.with_frame(*rule);
        }
        Error::syntax(line, found, format!("expected {}", failure.expected)).with_context(context)
    }
}
