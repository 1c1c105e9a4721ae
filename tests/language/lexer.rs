//! Integration tests for the lexer
//!
//! Tests tokenization of order-file source text.

use wraith_language::{Lexer, Payload, TokenKind, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source).iter().map(|t| t.kind).collect()
}

// =============================================================================
// Basic Tokens
// =============================================================================

#[test]
fn tokenize_bombard_line() {
    use TokenKind::*;
    assert_eq!(
        kinds("bombard 5 7 50%\n"),
        vec![Text, Spaces, Integer, Spaces, Integer, Spaces, Percentage, Eol, Eof]
    );
}

#[test]
fn tokenize_coordinates() {
    use TokenKind::*;
    assert_eq!(
        kinds("(1,-2,3,4)"),
        vec![ParenOp, Integer, Comma, Integer, Comma, Integer, Comma, Integer, ParenCl, Eol, Eof]
    );
}

#[test]
fn tokenize_numbers() {
    let tokens = Lexer::tokenize_all("42 -17 2.5 75%");
    assert_eq!(tokens[0].payload, Payload::Integer(42));
    assert_eq!(tokens[2].payload, Payload::Integer(-17));
    assert_eq!(tokens[4].payload, Payload::Float(2.5));
    assert_eq!(tokens[6].kind, TokenKind::Percentage);
    assert_eq!(tokens[6].payload, Payload::Integer(75));
}

#[test]
fn number_glued_to_text_is_text() {
    let tokens = Lexer::tokenize_all("12abc");
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].lexeme, "12abc");
}

#[test]
fn tokenize_quoted_text() {
    let tokens = Lexer::tokenize_all(r#""Ships \"sighted\"" x"#);
    assert_eq!(tokens[0].kind, TokenKind::QuotedText);
    assert_eq!(tokens[0].text(), Some("Ships \"sighted\""));
}

#[test]
fn unterminated_quote_ends_at_newline() {
    let tokens = Lexer::tokenize_all("\"open\nsurvey 1");
    assert_eq!(tokens[0].kind, TokenKind::QuotedText);
    assert_eq!(tokens[0].text(), Some("open"));
    assert_eq!(tokens[1].kind, TokenKind::Eol);
    assert_eq!(tokens[2].line, 2);
}

#[test]
fn comment_runs_to_end_of_line() {
    let tokens = Lexer::tokenize_all("survey 1 ; look around\n");
    let comment = tokens.iter().find(|t| t.kind == TokenKind::Comment).unwrap();
    assert_eq!(comment.lexeme, "; look around");
}

// =============================================================================
// Domain Words
// =============================================================================

#[test]
fn classify_domain_words() {
    let tokens = Lexer::tokenize_all("unsk gold dp-3 fg-2 mg-9 research tl-4 factory-6 slsu");
    let words: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Spaces)
        .map(|t| t.kind)
        .collect();
    use TokenKind::*;
    assert_eq!(
        words,
        vec![
            Population, Resource, DepositId, FactoryGroupId, MineGroupId, Research, Research,
            Product, Product, Eol, Eof
        ]
    );
    assert_eq!(tokens[0].material(), Some(("unskilled-worker", None)));
    assert_eq!(tokens[12].material(), Some(("research", Some(4))));
    assert_eq!(tokens[14].material(), Some(("factory", Some(6))));
    assert_eq!(tokens[16].material(), Some(("super-light-structural-unit", None)));
}

#[test]
fn domain_words_ignore_case() {
    let tokens = Lexer::tokenize_all("GOLD Soldier");
    assert_eq!(tokens[0].kind, TokenKind::Resource);
    assert_eq!(tokens[0].lexeme, "GOLD");
    assert_eq!(tokens[2].kind, TokenKind::Population);
}

// =============================================================================
// Stream Shape
// =============================================================================

#[test]
fn stream_always_ends_with_eol_eof() {
    for source in ["", "survey 1", "survey 1\n", "\n\n"] {
        let tokens = Lexer::tokenize_all(source);
        let n = tokens.len();
        assert_eq!(tokens[n - 2].kind, TokenKind::Eol, "{source:?}");
        assert_eq!(tokens[n - 1].kind, TokenKind::Eof, "{source:?}");
    }
}

#[test]
fn line_numbers_advance_on_newline() {
    let tokens = Lexer::tokenize_all("a\nb\n\nc");
    let c = tokens.iter().find(|t| t.lexeme == "c").unwrap();
    assert_eq!(c.line, 4);
}

#[test]
fn invalid_utf8_is_replaced() {
    let tokens = tokenize(b"survey \xff 1\n");
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Integer));
}

#[test]
fn lexemes_are_lossless() {
    let source = "setup 3 (10,20,30) colony transfer ; new\n5 food\nend";
    let rebuilt: String = Lexer::tokenize_all(source)
        .iter()
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(rebuilt, source);
}
