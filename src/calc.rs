//! Arithmetic calculator for notebook.
//!
//! Expressions use a fixed grammar: decimal numbers, `+ - * /`, unary sign
//! and parentheses. Nothing else is accepted, so the evaluator can never run
//! arbitrary input.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Integers stay exact under `+ - *` and only fall back to floats once they
//! outgrow `i128`; `/` always produces a float.

use std::fmt;

use thiserror::Error;

/// Display value for any failed evaluation
pub const ERROR: &str = "Error";

/// Maximum parenthesis/unary nesting accepted by the parser
const MAX_DEPTH: usize = 256;

/// Reason an expression could not be evaluated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    #[error("expression nested too deeply")]
    TooDeep,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

/// A computed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    fn checked(self) -> Result<Self, EvalError> {
        match self {
            Number::Float(value) if !value.is_finite() => Err(EvalError::NonFinite),
            other => Ok(other),
        }
    }

    fn add(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                exact_or_float(a.checked_add(b), a as f64 + b as f64)
            }
            (a, b) => Number::Float(a.as_f64() + b.as_f64()).checked(),
        }
    }

    fn sub(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                exact_or_float(a.checked_sub(b), a as f64 - b as f64)
            }
            (a, b) => Number::Float(a.as_f64() - b.as_f64()).checked(),
        }
    }

    fn mul(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                exact_or_float(a.checked_mul(b), a as f64 * b as f64)
            }
            (a, b) => Number::Float(a.as_f64() * b.as_f64()).checked(),
        }
    }

    fn div(self, rhs: Self) -> Result<Self, EvalError> {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Number::Float(self.as_f64() / divisor).checked()
    }

    fn neg(self) -> Result<Self, EvalError> {
        match self {
            Number::Int(value) => exact_or_float(value.checked_neg(), -(value as f64)),
            Number::Float(value) => Ok(Number::Float(-value)),
        }
    }
}

/// The exact integer when it fits, otherwise its float approximation
fn exact_or_float(exact: Option<i128>, approx: f64) -> Result<Number, EvalError> {
    match exact {
        Some(value) => Ok(Number::Int(value)),
        None => Number::Float(approx).checked(),
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Float(value) => f.write_str(&format_float(value)),
        }
    }
}

/// Shortest round-trip form; integral values keep one decimal ("2.0") and
/// very large or very small magnitudes switch to exponent form ("1e+16").
fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        let raw = format!("{value:e}");
        return match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => raw,
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(value) => write!(f, "{value}"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let token = match ch {
            ' ' | '\t' => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let mut end = start + ch.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        end = idx + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Num(parse_number(&input[start..end])?)
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<Number, EvalError> {
    let malformed = || EvalError::MalformedNumber(literal.to_string());
    match literal.matches('.').count() {
        0 => {
            // "007" is rejected, "0" and "00" are zero.
            if literal.len() > 1 && literal.starts_with('0') && literal.bytes().any(|b| b != b'0') {
                return Err(malformed());
            }
            match literal.parse::<i128>() {
                Ok(value) => Ok(Number::Int(value)),
                Err(_) => literal
                    .parse::<f64>()
                    .map_err(|_| malformed())
                    .and_then(|value| Number::Float(value).checked()),
            }
        }
        1 if literal != "." => literal
            .parse::<f64>()
            .map_err(|_| malformed())
            .and_then(|value| Number::Float(value).checked()),
        _ => Err(malformed()),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Number, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value = value.add(self.term()?)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value = value.sub(self.term()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<Number, EvalError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value = value.mul(self.unary()?)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    value = value.div(self.unary()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<Number, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        let value = match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.unary().and_then(Number::neg)
            }
            _ => self.primary(),
        };
        self.depth -= 1;
        value
    }

    fn primary(&mut self) -> Result<Number, EvalError> {
        match self.advance() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate `expression`, reporting why it failed
pub fn try_evaluate(expression: &str) -> Result<Number, EvalError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.advance() {
        None => Ok(value),
        Some(extra) => Err(EvalError::UnexpectedToken(extra.to_string())),
    }
}

/// Evaluate `expression` for display: the result, or `"Error"`
pub fn evaluate(expression: &str) -> String {
    match try_evaluate(expression) {
        Ok(value) => value.to_string(),
        Err(err) => {
            tracing::debug!(expression, error = %err, "evaluation failed");
            ERROR.to_string()
        }
    }
}

/// Pending expression typed one key at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    buffer: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `ch` is a key the calculator accepts into its buffer
    pub fn accepts(ch: char) -> bool {
        ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '.' | '(' | ')')
    }

    /// Append a key. Returns `false` for characters outside the grammar.
    pub fn push(&mut self, ch: char) -> bool {
        if !Self::accepts(ch) {
            return false;
        }
        self.buffer.push(ch);
        true
    }

    /// Clear everything (C)
    pub fn clear_all(&mut self) {
        self.buffer.clear();
    }

    /// Remove the last character (CE)
    pub fn clear_last(&mut self) {
        self.buffer.pop();
    }

    /// Replace the buffer with the evaluated result (or `"Error"`)
    pub fn evaluate(&mut self) -> &str {
        self.buffer = evaluate(&self.buffer);
        &self.buffer
    }

    pub fn display(&self) -> &str {
        &self.buffer
    }
}
