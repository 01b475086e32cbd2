//! Thompson NFA compiler for small infix regular expressions
//!
//! This library compiles a regular expression written in infix notation into a
//! nondeterministic finite automaton and simulates that automaton over input
//! strings. The pipeline has three stages:
//!
//! - [`postfix::convert`] rewrites the infix expression into postfix tokens,
//!   inserting the implicit concatenation operator.
//! - [`compiler::Compiler`] builds the automaton with Thompson's construction,
//!   composing [`partial::PartialNfa`] values on a stack.
//! - [`matcher::Matcher`] runs the automaton over input, tracking every active
//!   state at once instead of backtracking.
//!
//! The supported syntax is deliberately tiny: literal characters, alternation
//! `|`, and the postfix repetitions `?`, `*` and `+`. Concatenation is
//! implied by adjacency.
//!
//! ```
//! let nfa = pegrex::compile("ab*|c").unwrap();
//! assert!(nfa.read("abbb").unwrap());
//! assert!(nfa.read("c").unwrap());
//! assert!(!nfa.read("bc").unwrap());
//! ```

#[macro_use]
mod macros;

pub mod compiler;
pub mod matcher;
pub mod nfa;
pub mod partial;
pub mod postfix;
pub mod state;

pub use compiler::{build, Compiler};
pub use matcher::Matcher;
pub use nfa::{Nfa, State};
pub use partial::PartialNfa;
pub use postfix::{convert, Postfix, Token};
pub use state::{StateId, StateSet, Target};

/// The result of compiling or running an automaton
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling an expression or reading input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operator was applied with too few operands, or operands were left
    /// over at the end of a scan
    MalformedExpression(String),
    /// A postfix operator token the builder does not know about
    UnrecognizedOperator(char),
    /// An input character outside the automaton's alphabet
    InvalidSymbol(char),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedExpression(msg) => write!(f, "malformed expression: {}", msg),
            Error::UnrecognizedOperator(op) => write!(f, "unrecognized operator '{}'", op),
            Error::InvalidSymbol(sym) => write!(f, "symbol '{}' not in alphabet", sym),
        }
    }
}

impl std::error::Error for Error {}

/// Compile an infix expression into a complete automaton.
///
/// This is [`postfix::convert`] followed by [`compiler::build`].
pub fn compile(expr: &str) -> Result<Nfa> {
    let postfix = convert(expr)?;
    build(&postfix)
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
