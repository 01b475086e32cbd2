//! Infix to postfix conversion.
//!
//! The converter is a shunting-yard specialization for a grammar with one
//! binary operator in the input (`|`), one binary operator that never appears
//! in the input (concatenation, written `.` in postfix form) and three unary
//! postfix operators (`?`, `*`, `+`).

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Concatenation, inserted between adjacent operands.
pub const CONCAT: char = '.';
/// Alternation.
pub const ALTERNATE: char = '|';
/// Zero or one.
pub const OPTIONAL: char = '?';
/// Zero or more.
pub const STAR: char = '*';
/// One or more.
pub const PLUS: char = '+';

/// True for every character that is structural in postfix form.
pub fn is_operator(c: char) -> bool {
    matches!(c, CONCAT | ALTERNATE | OPTIONAL | STAR | PLUS)
}

fn is_unary(c: char) -> bool {
    matches!(c, OPTIONAL | STAR | PLUS)
}

/// A single postfix token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A symbol of the input alphabet
    Literal(char),
    /// A structural operator
    Operator(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) | Token::Operator(c) => write!(f, "{}", c),
        }
    }
}

/// A regular expression in postfix order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Parses postfix text. Operator characters become operators and every other
/// character is a literal, so `"ab."` is the concatenation of `a` and `b`.
impl FromStr for Postfix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Postfix> {
        let tokens = s
            .chars()
            .map(|c| if is_operator(c) { Token::Operator(c) } else { Token::Literal(c) })
            .collect();
        Ok(Postfix { tokens })
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Operands are partial postfix sequences; operators wait on their own stack.
struct Converter {
    operands: Vec<Vec<Token>>,
    operators: Vec<char>,
}

impl Converter {
    fn new() -> Self {
        Self {
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Pop the top operator and fold the two topmost operands with it.
    fn apply_top(&mut self) -> Result<()> {
        let op = match self.operators.pop() {
            Some(op) => op,
            None => return Ok(()),
        };
        let (rhs, mut lhs) = match (self.operands.pop(), self.operands.pop()) {
            (Some(rhs), Some(lhs)) => (rhs, lhs),
            _ => {
                return Err(Error::MalformedExpression(format!(
                    "operator '{}' is missing an operand",
                    op
                )))
            }
        };
        lhs.extend(rhs);
        lhs.push(Token::Operator(op));
        self.operands.push(lhs);
        Ok(())
    }

    fn apply_all(&mut self) -> Result<()> {
        while !self.operators.is_empty() {
            self.apply_top()?;
        }
        Ok(())
    }

    fn literal(&mut self, c: char) -> Result<()> {
        // Unary operators keep the operand/operator difference and binary ones
        // raise it by one, so a surplus of operands means the new literal
        // starts the right-hand side of an implicit concatenation.
        if self.operands.len() > self.operators.len() {
            while matches!(self.operators.last(), Some(&op) if op != ALTERNATE) {
                self.apply_top()?;
            }
            self.operators.push(CONCAT);
        }
        self.operands.push(vec![Token::Literal(c)]);
        Ok(())
    }

    fn unary(&mut self, op: char) -> Result<()> {
        match self.operands.last_mut() {
            Some(operand) => {
                operand.push(Token::Operator(op));
                Ok(())
            }
            None => Err(Error::MalformedExpression(format!(
                "operator '{}' has nothing to repeat",
                op
            ))),
        }
    }

    fn alternate(&mut self) -> Result<()> {
        self.apply_all()?;
        self.operators.push(ALTERNATE);
        Ok(())
    }

    fn finish(mut self) -> Result<Postfix> {
        self.apply_all()?;
        let tokens = self.operands.pop().unwrap_or_default();
        if !self.operands.is_empty() {
            return Err(Error::MalformedExpression(format!(
                "{} operands left unconsolidated",
                self.operands.len() + 1
            )));
        }
        Ok(Postfix { tokens })
    }
}

/// Convert an infix expression to postfix, making concatenation explicit.
///
/// An empty expression converts to an empty token sequence. The concatenation
/// marker `.` is reserved and may not appear in the input.
///
/// ```
/// assert_eq!(pegrex::convert("ab*").unwrap().to_string(), "ab*.");
/// assert_eq!(pegrex::convert("a|b").unwrap().to_string(), "ab|");
/// ```
pub fn convert(expr: &str) -> Result<Postfix> {
    let mut converter = Converter::new();

    for c in expr.chars() {
        match c {
            CONCAT => {
                return Err(Error::MalformedExpression(format!(
                    "'{}' is reserved for concatenation",
                    CONCAT
                )))
            }
            ALTERNATE => converter.alternate()?,
            c if is_unary(c) => converter.unary(c)?,
            c => converter.literal(c)?,
        }
    }

    let postfix = converter.finish()?;
    trace!("converted '{}' to postfix '{}'", expr, postfix);
    Ok(postfix)
}
