//! Formula tokenizer.
//!
//! Splits formula text into numbers, column placeholders, operators and
//! parentheses. Every token carries the byte offset it started at so the
//! parser can point at the offending spot in syntax errors.

use super::column_ref::ColumnRef;
use super::error::FormulaError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Column(ColumnRef),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `^` or `**`
    Caret,
    LParen,
    RParen,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Column(c) => format!("column {}", c),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Percent => "'%'".to_string(),
            Token::Caret => "'^'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Tokenize a formula.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, FormulaError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        let start = i;

        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if b.is_ascii_digit() || (b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)) {
            i = scan_number(bytes, i);
            let text = &source[start..i];
            let value = text
                .parse::<f64>()
                .map_err(|_| FormulaError::syntax(start, format!("invalid number '{}'", text)))?;
            tokens.push(Spanned {
                token: Token::Number(value),
                position: start,
            });
            continue;
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let word = &source[start..i];
            let Some(col) = ColumnRef::from_str(word) else {
                return Err(FormulaError::syntax(
                    start,
                    format!("unknown identifier '{}' (columns are written c1, c2, ...)", word),
                ));
            };
            tokens.push(Spanned {
                token: Token::Column(col),
                position: start,
            });
            continue;
        }

        let token = match b {
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Token::Caret
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'%' => Token::Percent,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            _ => {
                let ch = source[start..].chars().next().unwrap_or('?');
                return Err(FormulaError::syntax(
                    start,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };
        i += 1;
        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    Ok(tokens)
}

/// Scan `digits [. digits] [e [+-] digits]`, returning the end offset.
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
        // Only an exponent if digits follow; otherwise `e` starts an identifier.
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}
