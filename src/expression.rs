//! Arithmetic evaluator for price inputs such as `120+35.5*2`.
//!
//! Only decimal literals, the four arithmetic operators and unary signs are
//! understood. Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number
//! number := digits ['.' digits] | '.' digits
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("malformed number at position {0}")]
    MalformedNumber(usize),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

/// How a `,` in the input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommaMode {
    /// `1,5` means one and a half.
    #[default]
    DecimalPoint,
    /// `10,20` means ten plus twenty.
    Plus,
}

/// Evaluates `input`, ignoring whitespace.
pub fn evaluate(input: &str, comma: CommaMode) -> Result<f64, ExpressionError> {
    let normalized: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match (c, comma) {
            (',', CommaMode::DecimalPoint) => '.',
            (',', CommaMode::Plus) => '+',
            (other, _) => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut parser = Parser {
        chars: &normalized,
        pos: 0,
    };
    let value = parser.expr()?;

    if let Some(&c) = parser.peek() {
        return Err(ExpressionError::UnexpectedChar(c, parser.pos));
    }
    if !value.is_finite() {
        return Err(ExpressionError::NonFinite);
    }

    Ok(value)
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&char> {
        self.chars.get(self.pos)
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        while let Some(&op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.factor()?;
        while let Some(&op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ExpressionError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ExpressionError> {
        match self.peek() {
            Some('+') => {
                self.pos += 1;
                self.factor()
            }
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(c) if c.is_ascii_digit() || *c == '.' => self.number(),
            Some(&c) => Err(ExpressionError::UnexpectedChar(c, self.pos)),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, ExpressionError> {
        let start = self.pos;
        let mut seen_dot = false;
        let mut seen_digit = false;

        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() {
                seen_digit = true;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            self.pos += 1;
        }

        if !seen_digit {
            return Err(ExpressionError::MalformedNumber(start));
        }

        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse::<f64>()
            .map_err(|_| ExpressionError::MalformedNumber(start))
    }
}
