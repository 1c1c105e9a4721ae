//! Integration tests for the token filters

use wraith_language::filter::{
    collapse_empty_lines, prepare_for_parser, remove_comments, remove_spaces,
};
use wraith_language::{Lexer, TokenKind};

fn kinds(tokens: &[wraith_language::Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn remove_spaces_is_idempotent() {
    let tokens = Lexer::tokenize_all("  bombard   5 7\t50%  \n");
    let once = remove_spaces(&tokens);
    let twice = remove_spaces(&once);
    assert_eq!(once, twice);
    assert!(once.iter().all(|t| t.kind != TokenKind::Spaces));
}

#[test]
fn remove_comments_keeps_the_newline() {
    let tokens = remove_comments(&Lexer::tokenize_all("; header\nsurvey 1\n"));
    assert_eq!(tokens[0].kind, TokenKind::Eol);
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
}

#[test]
fn collapse_keeps_one_eol_per_run() {
    let tokens = collapse_empty_lines(&Lexer::tokenize_all("a\n\n\n\nb\n"));
    use TokenKind::*;
    assert_eq!(kinds(&tokens), vec![Text, Eol, Text, Eol, Eof]);
}

#[test]
fn prepared_stream_keeps_line_numbers() {
    let tokens = prepare_for_parser(&Lexer::tokenize_all("; turn 1\n\n  \nbombard 5 7 50%\n"));
    use TokenKind::*;
    assert_eq!(
        kinds(&tokens),
        vec![Eol, Text, Integer, Integer, Percentage, Eol, Eof]
    );
    assert_eq!(tokens[1].line, 4);
}

#[test]
fn prepared_blank_input_is_eol_eof() {
    let tokens = prepare_for_parser(&Lexer::tokenize_all("\n ; nothing\n\n"));
    use TokenKind::*;
    assert_eq!(kinds(&tokens), vec![Eol, Eof]);
}
