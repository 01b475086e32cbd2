use crate::nfa::Nfa;
use crate::partial::PartialNfa;
use crate::postfix::{Postfix, Token, ALTERNATE, CONCAT, OPTIONAL, PLUS, STAR};
use crate::{Error, Result};

/// Compiler that turns postfix tokens into a Thompson NFA.
///
/// Each literal pushes a one-state fragment; each operator pops its operands
/// and pushes their combination. A well-formed sequence leaves exactly one
/// fragment, which is then closed off with an accept state.
pub struct Compiler {
    stack: Vec<PartialNfa>,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Compile a postfix sequence into a complete automaton.
    ///
    /// An empty sequence compiles to an automaton that accepts only the empty
    /// string.
    pub fn compile(mut self, postfix: &Postfix) -> Result<Nfa> {
        trace!("compiling postfix '{}'", postfix);

        for &token in postfix {
            match token {
                Token::Literal(symbol) => self.stack.push(PartialNfa::literal(symbol)),
                Token::Operator(op) => self.apply(op)?,
            }
            trace!("after '{}': {} fragment(s) on the stack", token, self.stack.len());
        }

        let fragment = match (self.stack.pop(), self.stack.is_empty()) {
            (Some(fragment), true) => fragment,
            (None, _) if postfix.is_empty() => PartialNfa::empty(),
            (None, _) => {
                return Err(Error::MalformedExpression(
                    "no automaton left after the scan".to_string(),
                ))
            }
            (Some(_), false) => {
                return Err(Error::MalformedExpression(format!(
                    "{} operands left unconsolidated",
                    self.stack.len() + 1
                )))
            }
        };

        let nfa = fragment.finish();
        debug!(
            "compiled '{}' into {} states over alphabet {:?}",
            postfix,
            nfa.len(),
            nfa.alphabet()
        );
        Ok(nfa)
    }

    /// Combine fragments from the top of the stack with `op`.
    fn apply(&mut self, op: char) -> Result<()> {
        let fragment = match op {
            CONCAT => {
                let (a, b) = self.pop_pair(op)?;
                PartialNfa::concatenate(a, b)
            }
            ALTERNATE => {
                let (a, b) = self.pop_pair(op)?;
                PartialNfa::alternate(a, b)
            }
            OPTIONAL => PartialNfa::optional(self.pop_one(op)?),
            STAR => PartialNfa::star(self.pop_one(op)?),
            PLUS => PartialNfa::plus(self.pop_one(op)?),
            _ => return Err(Error::UnrecognizedOperator(op)),
        };
        self.stack.push(fragment);
        Ok(())
    }

    fn pop_one(&mut self, op: char) -> Result<PartialNfa> {
        self.stack.pop().ok_or_else(|| insufficient(op))
    }

    /// Pops the right operand, then the left one. Returns them as (left, right).
    fn pop_pair(&mut self, op: char) -> Result<(PartialNfa, PartialNfa)> {
        if self.stack.len() < 2 {
            return Err(insufficient(op));
        }
        let b = self.pop_one(op)?;
        let a = self.pop_one(op)?;
        Ok((a, b))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn insufficient(op: char) -> Error {
    Error::MalformedExpression(format!("insufficient number of arguments for '{}'", op))
}

/// Build a complete automaton from postfix tokens.
pub fn build(postfix: &Postfix) -> Result<Nfa> {
    Compiler::new().compile(postfix)
}
