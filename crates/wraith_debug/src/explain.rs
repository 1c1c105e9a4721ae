//! Near-miss diagnostics.
//!
//! When a line is rejected, the most useful hint is usually the rule that got
//! furthest before giving up: "bombard matched 3 terminals, then expected
//! PERCENTAGE".

use std::fmt;

use wraith_language::{DebugLabel, DebugTree, Token};

/// The failed rule attempt that matched the most terminals.
#[derive(Clone, Debug, PartialEq)]
pub struct NearMiss {
    /// Name of the failed rule.
    pub rule: &'static str,
    /// Terminals matched anywhere under the rule before it failed.
    pub matched: usize,
    /// What the rule wanted next: a token shape, or the sub-rule that failed.
    pub expected: String,
    /// The token that was there instead.
    pub found: Option<Token>,
}

impl fmt::Display for NearMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "closest rule `{}` matched {} terminal", self.rule, self.matched)?;
        if self.matched != 1 {
            f.write_str("s")?;
        }
        write!(f, ", then expected {}", self.expected)?;
        match &self.found {
            Some(token) => write!(f, " but found {token}"),
            None => Ok(()),
        }
    }
}

/// Finds the failed rule attempt that matched the most terminals.
///
/// Only rules that failed on a terminal or a sub-rule are candidates; a
/// dispatch rule that gave up without trying anything is skipped. Among
/// equally good candidates the innermost, latest one wins, so a failed
/// `bombard` is preferred over the `order` and `orders` rules around it.
#[must_use]
pub fn nearest_miss(tree: &DebugTree) -> Option<NearMiss> {
    let mut best: Option<NearMiss> = None;
    visit_failures(tree, &mut |node| {
        let Some(rule) = node.rule_name() else {
            return;
        };
        let Some((expected, found)) = failure_point(node) else {
            return;
        };
        let matched = matched_terminals(node);
        if best.as_ref().is_none_or(|b| matched >= b.matched) {
            best = Some(NearMiss {
                rule,
                matched,
                expected,
                found: found.cloned(),
            });
        }
    });
    best
}

/// Counts successful terminal matches anywhere under `tree`.
#[must_use]
pub fn matched_terminals(tree: &DebugTree) -> usize {
    let own = usize::from(matches!(tree.label, DebugLabel::Match { matched: true, .. }));
    own + tree.children.iter().map(matched_terminals).sum::<usize>()
}

fn visit_failures<'a>(tree: &'a DebugTree, visit: &mut impl FnMut(&'a DebugTree)) {
    if matches!(tree.label, DebugLabel::Rule { result: false, .. }) {
        visit(tree);
    }
    for child in &tree.children {
        visit_failures(child, visit);
    }
}

/// What a failed rule stumbled on: its last failed match, else its last
/// failed sub-rule.
fn failure_point(tree: &DebugTree) -> Option<(String, Option<&Token>)> {
    if let Some((expected, found)) = last_failed_match(tree) {
        return Some((expected.to_string(), found));
    }
    last_failed_rule(tree).map(|rule| (rule.to_string(), None))
}

fn last_failed_match(tree: &DebugTree) -> Option<(&str, Option<&Token>)> {
    tree.children.iter().rev().find_map(|child| match &child.label {
        DebugLabel::Match {
            expected,
            found,
            matched: false,
        } => Some((expected.as_str(), found.as_ref())),
        DebugLabel::Rule { result: false, .. } => last_failed_match(child),
        _ => None,
    })
}

fn last_failed_rule(tree: &DebugTree) -> Option<&'static str> {
    tree.children
        .iter()
        .rev()
        .find(|c| matches!(c.label, DebugLabel::Rule { result: false, .. }))
        .and_then(DebugTree::rule_name)
}
