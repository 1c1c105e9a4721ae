//! Integration tests for the parse builder
//!
//! Uses a small grammar `pair = INTEGER INTEGER EOL` to exercise the builder
//! independently of the order grammar.

use wraith_foundation::ErrorKind;
use wraith_language::filter::prepare_for_parser;
use wraith_language::{Builder, DebugLabel, Lexer, Token, TokenKind, Tree};

fn tokens(source: &str) -> Vec<Token> {
    prepare_for_parser(&Lexer::tokenize_all(source))
}

fn pair(b: &mut Builder<'_>) -> bool {
    b.rule("pair", |b| {
        b.match_kind(TokenKind::Integer)
            && b.match_kind(TokenKind::Integer)
            && b.match_kind(TokenKind::Eol)
    })
}

fn pairs(b: &mut Builder<'_>) -> bool {
    b.rule("pairs", |b| {
        while pair(b) {}
        b.match_kind(TokenKind::Eof)
    })
}

#[test]
fn builds_tree_from_successful_rules() {
    let tokens = tokens("1 2\n3 4\n");
    let mut b = Builder::new(&tokens);
    assert!(pairs(&mut b));

    let outcome = b.finish();
    assert!(outcome.is_success());
    let tree = outcome.parse_tree.unwrap();
    assert_eq!(tree.name(), Some("pairs"));
    let rules: Vec<_> = tree.children().iter().filter_map(Tree::name).collect();
    assert_eq!(rules, vec!["pair", "pair"]);
    assert_eq!(tree.children()[1].line(), Some(2));
}

#[test]
fn failed_rule_rewinds_and_leaves_no_node() {
    let tokens = tokens("1 2\n3 x\n");
    let mut b = Builder::new(&tokens);
    b.enter("root");
    assert!(pair(&mut b));
    let before = b.position();
    assert!(!pair(&mut b));
    assert_eq!(b.position(), before);
    assert!(!b.exit(false));

    let outcome = b.finish();
    assert!(outcome.parse_tree.is_none());
    let trace = outcome.debug_tree.unwrap();
    let results: Vec<_> = trace.rules().map(|r| r.succeeded()).collect();
    assert_eq!(results, vec![true, false]);
}

#[test]
fn error_reports_farthest_failure_line() {
    let tokens = tokens("1 2\n\n3 x\n");
    let mut b = Builder::new(&tokens);
    assert!(!pairs(&mut b));
    let err = b.finish().error.unwrap();
    assert_eq!(err.line(), Some(3));
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
}

#[test]
fn root_must_reach_end_of_input() {
    let tokens = tokens("1 2\n3 4\n");
    let mut b = Builder::new(&tokens);
    assert!(!pair(&mut b));
    assert_eq!(b.position(), 0);
    let err = b.finish().error.unwrap();
    assert!(matches!(err.kind, ErrorKind::UnconsumedInput { line: 2 }));
}

#[test]
fn debug_tree_records_every_match() {
    let tokens = tokens("1 x\n");
    let mut b = Builder::new(&tokens);
    pairs(&mut b);
    let trace = b.finish().debug_tree.unwrap();
    let pair = trace.find_rule("pair").unwrap();
    assert!(!pair.succeeded());
    assert_eq!(pair.matched_count(), 1);
    let DebugLabel::Match { expected, found, matched } = &pair.children[1].label else {
        panic!("expected a match leaf");
    };
    assert_eq!(expected, "INTEGER");
    assert_eq!(found.as_ref().map(|t| t.lexeme.as_str()), Some("x"));
    assert!(!matched);
}
