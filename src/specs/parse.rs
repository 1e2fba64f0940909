//! Evaluation of text typed into a frequency field.
//!
//! Besides plain numbers, simple arithmetic is accepted so users can type
//! things like `48e3/4` or `(1000 - 20) / 2`. Supported: `+ - * /`,
//! parentheses (nested at most 64 deep), unary signs and decimal or
//! scientific literals.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// What to do with a negative result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPolicy {
    /// Use the absolute value.
    #[default]
    Magnitude,
    /// Fail with [`ParseError::Negative`].
    RejectNegative,
    /// Keep the sign.
    Any,
}

/// Evaluates `text` and applies the sign policy.
pub fn evaluate(text: &str, sign: SignPolicy) -> Result<f64, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = ExprParser::new(text);
    let value = parser.expr()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.invalid());
    }

    if !value.is_finite() {
        return Err(ParseError::NonFinite {
            text: text.to_string(),
        });
    }

    match sign {
        SignPolicy::Magnitude => Ok(value.abs()),
        SignPolicy::RejectNegative if value < 0.0 => Err(ParseError::Negative {
            text: text.to_string(),
        }),
        SignPolicy::RejectNegative | SignPolicy::Any => Ok(value),
    }
}

/// Deepest parenthesis nesting accepted in one expression.
const MAX_NESTING: usize = 64;

/// Recursive descent parser over the ASCII bytes of the input.
struct ExprParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn invalid(&self) -> ParseError {
        ParseError::Invalid {
            text: self.text.to_string(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_whitespace(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, ParseError> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == b'+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, ParseError> {
        let mut value = self.unary()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op == b'*' {
                value *= rhs;
            } else if rhs == 0.0 {
                return Err(ParseError::DivisionByZero);
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    // unary := ('+' | '-')* primary
    fn unary(&mut self) -> Result<f64, ParseError> {
        let mut negate = false;
        while let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            negate ^= sign == b'-';
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64, ParseError> {
        match self.peek() {
            Some(b'(') => {
                if self.depth == MAX_NESTING {
                    return Err(self.invalid());
                }
                self.pos += 1;
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                if self.peek() != Some(b')') {
                    return Err(self.invalid());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            _ => Err(self.invalid()),
        }
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'.')
        {
            self.pos += 1;
        }

        // Exponent only if followed by at least one digit
        if matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            let mut end = self.pos + 1;
            if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
                end += 1;
            }
            if self.bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
                self.pos = end;
                while self.bytes.get(self.pos).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }

        self.text[start..self.pos]
            .parse::<f64>()
            .map_err(|_| self.invalid())
    }
}
