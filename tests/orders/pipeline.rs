//! Integration tests for the full pipeline
//!
//! Bytes in, orders or a failure with a trace out.

use wraith_foundation::ErrorKind;
use wraith_language::{Lexer, tokenize};
use wraith_orders::{Keyword, Order, ParseConfig, parse, parse_tokens};

const TURN: &str = "\
; turn 12 orders
setup 3 (10,20,30) colony transfer
5 food
120 fuel
end

bombard 5 7 50%
invade 5 9 100%
news (1,2,3) \"Ships sighted\"
";

#[test]
fn parses_a_whole_turn() {
    let parsed = parse(TURN.as_bytes(), &ParseConfig::default()).unwrap();
    assert!(parsed.is_clean());
    let lines: Vec<_> = parsed.orders.iter().map(Order::line).collect();
    assert_eq!(lines, vec![2, 7, 8, 9]);
    assert!(matches!(parsed.orders[0], Order::Setup(_)));
    assert!(matches!(parsed.orders[3], Order::News(_)));
}

#[test]
fn parse_and_parse_tokens_agree() {
    let config = ParseConfig::default();
    let from_bytes = parse(TURN.as_bytes(), &config).unwrap();
    let from_tokens = parse_tokens(&Lexer::tokenize_all(TURN), &config).unwrap();
    assert_eq!(from_bytes.orders, from_tokens.orders);
    assert_eq!(from_bytes.parse_tree, from_tokens.parse_tree);
}

#[test]
fn recovery_keeps_going_after_garbage() {
    let parsed = parse(b"garbage line\nbombard 1 2 10%\n", &ParseConfig::recovering()).unwrap();
    assert_eq!(parsed.orders.len(), 2);
    let Order::Unknown(unknown) = &parsed.orders[0] else {
        panic!("expected unknown first");
    };
    assert_eq!(unknown.line, 1);
    assert_eq!(unknown.command, "garbage line");
    assert!(matches!(parsed.orders[1], Order::Bombard(_)));
    assert!(parsed.errors.is_empty());
}

#[test]
fn fail_fast_reports_line_one_with_trace() {
    let failure = parse(b"garbage line\nbombard 1 2 10%\n", &ParseConfig::default()).unwrap_err();
    assert_eq!(failure.line(), Some(1));
    assert!(matches!(failure.error.kind, ErrorKind::Syntax { line: 1, .. }));
    let trace = failure.debug_tree.unwrap();
    assert_eq!(trace.rule_name(), Some("orders"));
    assert!(!trace.succeeded());
}

#[test]
fn fail_fast_error_names_the_rule_stack() {
    let failure = parse(b"survey 1\nbombard 1 2 x\n", &ParseConfig::default()).unwrap_err();
    assert_eq!(failure.line(), Some(2));
    let stack = failure.error.context.map(|c| c.stack).unwrap_or_default();
    assert!(stack.iter().any(|f| f.contains("bombard")), "{stack:?}");
}

#[test]
fn unterminated_setup_is_unknown_in_recovery() {
    let parsed = parse(
        b"setup 3 (10,20,30) colony transfer\n5 food\nsurvey 1\n",
        &ParseConfig::recovering(),
    )
    .unwrap();
    let kinds: Vec<_> = parsed.orders.iter().map(Order::keyword).collect();
    assert_eq!(kinds, vec![None, None, Some(Keyword::Survey)]);
}

#[test]
fn debug_trace_is_opt_in() {
    let quiet = parse(b"survey 1\n", &ParseConfig::default()).unwrap();
    assert!(quiet.debug_tree.is_none());
    let loud = parse(b"survey 1\n", &ParseConfig::debug()).unwrap();
    assert!(loud.debug_tree.is_some());
}

#[test]
fn arbitrary_bytes_never_panic() {
    let inputs: [&[u8]; 5] = [b"", b"\xff\xfe", b"(((", b"setup", b"\"unterminated"];
    for input in inputs {
        let _ = parse(input, &ParseConfig::default());
        assert!(parse(input, &ParseConfig::recovering()).is_ok());
        assert!(!tokenize(input).is_empty());
    }
}
