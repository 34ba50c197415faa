//! Tokenizer for the expression grammar.

use crate::error::ExprError;

/// One lexical token with its byte offset in the source.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl TokenKind {
    /// Short description used in `UnexpectedToken` messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number '{n}'"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Plus => "'+'".into(),
            Self::Minus => "'-'".into(),
            Self::Star => "'*'".into(),
            Self::Slash => "'/'".into(),
            Self::Caret => "'^'".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
        }
    }
}

/// Tokenize the whole source. Whitespace separates tokens and is otherwise
/// ignored. Numbers are unsigned decimal literals with optional fraction and
/// exponent; a leading sign is the unary operator, handled by the parser.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i] as char;
        let kind = match c {
            ' ' | '\t' | '\r' | '\n' => {
                i += 1;
                continue;
            }
            '+' => {
                i += 1;
                TokenKind::Plus
            }
            '-' => {
                i += 1;
                TokenKind::Minus
            }
            '*' => {
                i += 1;
                TokenKind::Star
            }
            '/' => {
                i += 1;
                TokenKind::Slash
            }
            '^' => {
                i += 1;
                TokenKind::Caret
            }
            '(' => {
                i += 1;
                TokenKind::LParen
            }
            ')' => {
                i += 1;
                TokenKind::RParen
            }
            '0'..='9' | '.' => {
                i = scan_number(bytes, i);
                let text = &src[start..i];
                let value = text.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
                    text: text.to_string(),
                    pos: start,
                })?;
                TokenKind::Number(value)
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                while i < bytes.len() && is_ident_continue(bytes[i]) {
                    i += 1;
                }
                TokenKind::Ident(src[start..i].to_string())
            }
            _ => return Err(ExprError::UnexpectedChar { ch: c, pos: start }),
        };
        tokens.push(Token { kind, pos: start });
    }

    Ok(tokens)
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Advance past a numeric literal: digits, optional fraction, optional
/// `e`/`E` exponent with sign. The exponent marker is consumed only when a
/// digit actually follows, so `2e` lexes as `2` then identifier `e`.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}
