use crate::nfa::Nfa;
use crate::state::StateSet;
use crate::{Error, Result};

/// Executes a compiled NFA against input by tracking every active state.
///
/// The active set is kept epsilon-closed between transitions, so acceptance
/// is a plain intersection with the accept states.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    nfa: &'a Nfa,
    active: StateSet,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a Nfa) -> Self {
        let mut matcher = Self {
            nfa,
            active: StateSet::with_capacity(nfa.len()),
        };
        matcher.reset();
        matcher
    }

    /// Return to the epsilon closure of the entry state.
    pub fn reset(&mut self) {
        let start = StateSet::singleton(self.nfa.start(), self.nfa.len());
        self.active = self.nfa.epsilon_closure(&start);
    }

    /// The states currently occupied
    pub fn active(&self) -> &StateSet {
        &self.active
    }

    /// Consume one symbol.
    ///
    /// An empty active set stays empty; no dead state is needed.
    pub fn transition(&mut self, symbol: char) -> Result<()> {
        if !self.nfa.alphabet().contains(&symbol) {
            return Err(Error::InvalidSymbol(symbol));
        }

        let closure = self.nfa.epsilon_closure(&self.active);
        let next = self.nfa.step(&closure, symbol);
        self.active = self.nfa.epsilon_closure(&next);
        trace!("'{}' -> {:?}", symbol, self.active);
        Ok(())
    }

    /// True if any active state is an accept state
    pub fn accept(&self) -> bool {
        self.nfa.is_accepting(&self.active)
    }

    /// Reset, consume all of `input`, and report acceptance.
    pub fn read(&mut self, input: &str) -> Result<bool> {
        self.reset();
        for symbol in input.chars() {
            self.transition(symbol)?;
        }
        Ok(self.accept())
    }
}
