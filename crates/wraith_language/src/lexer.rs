//! Lexer for Wraith order files.
//!
//! The lexer converts source text into a flat stream of classified tokens in
//! a single left-to-right pass. It never fails: anything it cannot classify
//! becomes `TEXT`.

use crate::token::{Payload, Token, TokenKind};
use crate::vocabulary;

/// Lexer for order file source text.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current line number (1-based).
    line: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
        }
    }

    /// Returns the current line number.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the next token from the source, or `EOF` once it is exhausted.
    pub fn next_token(&mut self) -> Token {
        let line = self.line;
        let Some(c) = self.rest.chars().next() else {
            return Token::eof(line);
        };

        match c {
            '\n' => {
                self.take(1);
                self.line += 1;
                Token::new(line, TokenKind::Eol, "\n", Payload::None)
            }
            ',' => self.single(TokenKind::Comma),
            '(' => self.single(TokenKind::ParenOp),
            ')' => self.single(TokenKind::ParenCl),
            ';' => {
                let len = self.rest.find('\n').unwrap_or(self.rest.len());
                Token::new(line, TokenKind::Comment, self.take(len), Payload::None)
            }
            '"' => self.scan_quoted(),
            c if is_space(c) => {
                let len = self
                    .rest
                    .find(|c: char| !is_space(c))
                    .unwrap_or(self.rest.len());
                Token::new(line, TokenKind::Spaces, self.take(len), Payload::None)
            }
            c if starts_number(c, self.rest) => self.scan_number().unwrap_or_else(|| self.scan_text()),
            _ => self.scan_text(),
        }
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments and spaces are included. The result always ends with an
    /// `EOL` followed by `EOF`; an `EOL` is synthesized if the source does
    /// not end with a newline.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::Eof {
                if tokens.last().is_none_or(|t: &Token| t.kind != TokenKind::Eol) {
                    tokens.push(Token::eol(token.line));
                }
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    /// Consumes `len` bytes and returns them.
    fn take(&mut self, len: usize) -> &'src str {
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        Token::new(line, kind, self.take(1), Payload::None)
    }

    /// Scans a double-quoted string. The string ends at the closing quote or
    /// at end of line, whichever comes first. `\"` is the only escape.
    fn scan_quoted(&mut self) -> Token {
        let line = self.line;
        let bytes = self.rest.as_bytes();
        let mut end = 1;
        let mut closed = false;
        while end < bytes.len() {
            match bytes[end] {
                b'\\' if bytes.get(end + 1) == Some(&b'"') => end += 2,
                b'"' => {
                    end += 1;
                    closed = true;
                    break;
                }
                b'\n' => break,
                _ => end += 1,
            }
        }
        let lexeme = self.take(end);
        let inner_end = if closed { lexeme.len() - 1 } else { lexeme.len() };
        let inner = lexeme[1..inner_end].replace("\\\"", "\"");
        Token::new(line, TokenKind::QuotedText, lexeme, Payload::Text(inner))
    }

    /// Scans an integer, float, or percentage. Returns `None` without
    /// consuming anything if the numeric run is not followed by a delimiter
    /// or does not fit in an `i64`.
    fn scan_number(&mut self) -> Option<Token> {
        let line = self.line;
        let bytes = self.rest.as_bytes();
        let mut end = usize::from(matches!(bytes[0], b'+' | b'-'));
        end += count_digits(&bytes[end..]);

        let mut kind = TokenKind::Integer;
        if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
            end += 1 + count_digits(&bytes[end + 1..]);
            kind = TokenKind::Float;
        } else if bytes.get(end) == Some(&b'%') {
            end += 1;
            kind = TokenKind::Percentage;
        }

        if !self.rest[end..].chars().next().is_none_or(is_delimiter) {
            return None;
        }

        let text = &self.rest[..end];
        let payload = match kind {
            TokenKind::Float => Payload::Float(text.parse().ok()?),
            TokenKind::Percentage => Payload::Integer(text[..end - 1].parse().ok()?),
            _ => Payload::Integer(text.parse().ok()?),
        };
        Some(Token::new(line, kind, self.take(end), payload))
    }

    /// Scans a run of characters up to whitespace or newline and classifies
    /// it against the domain vocabulary.
    fn scan_text(&mut self) -> Token {
        let line = self.line;
        let len = self
            .rest
            .find(|c: char| c == '\n' || is_space(c))
            .unwrap_or(self.rest.len());
        let lexeme = self.take(len);
        let (kind, payload) = vocabulary::classify(lexeme);
        Token::new(line, kind, lexeme, payload)
    }
}

/// Tokenizes raw input bytes. Invalid UTF-8 is replaced, never rejected.
#[must_use]
pub fn tokenize(input: &[u8]) -> Vec<Token> {
    let source = String::from_utf8_lossy(input);
    Lexer::tokenize_all(&source)
}

/// Whitespace other than newline. The UTF-8 replacement character counts.
fn is_space(c: char) -> bool {
    c != '\n' && (c.is_whitespace() || c == char::REPLACEMENT_CHARACTER)
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '\n' | ',' | '(' | ')' | ';') || is_space(c)
}

fn starts_number(c: char, rest: &str) -> bool {
    match c {
        '0'..='9' => true,
        '+' | '-' => rest.as_bytes().get(1).is_some_and(u8::is_ascii_digit),
        _ => false,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
