//! Literal unescaping.
//!
//! Inside quotes, `\` makes the next character literal and `[digits]` is a
//! numeric escape producing one codepoint:
//!
//! | escape      | base                         |
//! |-------------|------------------------------|
//! | `[0x41]`    | hex                          |
//! | `[0]`       | decimal zero                 |
//! | `[0101]`    | octal (digits after the `0`) |
//! | `[65]`      | decimal                      |

use std::fmt;
use std::ops::Range;

use thrax_core::{IntSeq, MAX_CODEPOINT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralErrorKind {
    Unterminated,
    Empty,
    InvalidDigit { base: &'static str },
    OutOfRange,
    DanglingEscape,
}

/// A malformed escape. `span` is a byte range within the raw literal text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct LiteralError {
    pub kind: LiteralErrorKind,
    pub span: Range<usize>,
    pub text: String,
}

impl LiteralError {
    fn describe(&self) -> String {
        let text = &self.text;
        match &self.kind {
            LiteralErrorKind::Unterminated => format!("`{text}` has no closing `]`"),
            LiteralErrorKind::Empty => "`[]` has no digits".to_string(),
            LiteralErrorKind::InvalidDigit { base } => {
                format!("`{text}` is not a valid {base} number")
            }
            LiteralErrorKind::OutOfRange => format!("`{text}` is above U+10FFFF"),
            LiteralErrorKind::DanglingEscape => "`\\` at the end of the literal".to_string(),
        }
    }
}

impl fmt::Display for LiteralErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unterminated => write!(f, "unterminated"),
            Self::Empty => write!(f, "empty"),
            Self::InvalidDigit { base } => write!(f, "invalid {base} digit"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::DanglingEscape => write!(f, "dangling escape"),
        }
    }
}

/// Resolves escapes in the raw text between the quotes.
pub fn parse_literal(raw: &str) -> Result<IntSeq, LiteralError> {
    let mut out: Vec<u32> = Vec::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped as u32),
                None => {
                    return Err(LiteralError {
                        kind: LiteralErrorKind::DanglingEscape,
                        span: start..raw.len(),
                        text: "\\".to_string(),
                    });
                }
            },
            '[' => {
                let Some(close) = raw[start..].find(']').map(|i| start + i) else {
                    return Err(LiteralError {
                        kind: LiteralErrorKind::Unterminated,
                        span: start..raw.len(),
                        text: raw[start..].to_string(),
                    });
                };
                let span = start..close + 1;
                out.push(parse_numeric_escape(&raw[start + 1..close], span)?);
                while chars.next_if(|&(i, _)| i <= close).is_some() {}
            }
            _ => out.push(c as u32),
        }
    }

    Ok(IntSeq::from(out))
}

fn parse_numeric_escape(digits: &str, span: Range<usize>) -> Result<u32, LiteralError> {
    let error = |kind| LiteralError {
        kind,
        span: span.clone(),
        text: format!("[{digits}]"),
    };

    if digits.is_empty() {
        return Err(error(LiteralErrorKind::Empty));
    }

    let (body, radix, base) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (hex, 16, "hexadecimal")
    } else if digits == "0" {
        (digits, 10, "decimal")
    } else if let Some(octal) = digits.strip_prefix('0') {
        (octal, 8, "octal")
    } else {
        (digits, 10, "decimal")
    };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(error(LiteralErrorKind::InvalidDigit { base }));
    }

    match u32::from_str_radix(body, radix) {
        Ok(value) if value <= MAX_CODEPOINT => Ok(value),
        _ => Err(error(LiteralErrorKind::OutOfRange)),
    }
}
