use crate::matcher::Matcher;
use crate::state::{StateId, StateSet};
use crate::Result;
use std::collections::{BTreeMap, BTreeSet};

/// A state of a complete automaton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// States reachable without consuming input
    pub epsilon: StateSet,
    /// States reachable by consuming a symbol
    pub symbols: BTreeMap<char, StateSet>,
}

impl State {
    /// A state with no outgoing transitions
    pub fn new(capacity: usize) -> Self {
        State {
            epsilon: StateSet::with_capacity(capacity),
            symbols: BTreeMap::new(),
        }
    }

    /// Destinations on `symbol`, if there are any
    pub fn on(&self, symbol: char) -> Option<&StateSet> {
        self.symbols.get(&symbol)
    }
}

/// A complete Thompson NFA with a single accept state.
///
/// The automaton is immutable once built. Simulation state lives in a
/// [`Matcher`], so any number of matchers can run over one `Nfa`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    accepting: StateSet,
    alphabet: BTreeSet<char>,
}

impl Nfa {
    pub(crate) fn new(
        states: Vec<State>,
        start: StateId,
        accepting: StateSet,
        alphabet: BTreeSet<char>,
    ) -> Self {
        Self {
            states,
            start,
            accepting,
            alphabet,
        }
    }

    /// The entry state
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// Every symbol that labels some transition
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Get epsilon closure of a set of states.
    ///
    /// Terminates on cyclic epsilon paths since a state is only expanded the
    /// first time it enters the closure.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(state_id) = stack.pop() {
            let Some(state) = self.states.get(state_id) else {
                continue;
            };
            for next in state.epsilon.iter() {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Union of the destinations on `symbol` from every state in `states`.
    /// Epsilon moves are not followed.
    pub fn step(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut next = StateSet::with_capacity(self.len());
        for state_id in states.iter() {
            if let Some(targets) = self.states.get(state_id).and_then(|s| s.on(symbol)) {
                next.union_with(targets);
            }
        }
        next
    }

    /// Check if any state in the set is accepting
    pub fn is_accepting(&self, states: &StateSet) -> bool {
        states.intersects(&self.accepting)
    }

    /// A fresh executor positioned at the epsilon closure of the entry state.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self)
    }

    /// Run the whole of `input` and report acceptance.
    ///
    /// Fails with [`Error::InvalidSymbol`](crate::Error::InvalidSymbol) on the
    /// first character outside the alphabet.
    pub fn read(&self, input: &str) -> Result<bool> {
        self.matcher().read(input)
    }

    /// Like [`Nfa::read`], but input outside the alphabet is simply rejected.
    pub fn is_match(&self, input: &str) -> bool {
        self.read(input).unwrap_or(false)
    }
}
