//! State identifiers and the sets built from them.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state ID in an automaton's state table
pub type StateId = usize;

/// The destination of a transition in a partial automaton.
///
/// `Exit` stands for the successor of the fragment, which does not exist yet.
/// It is patched to a real state once the enclosing construction knows where
/// the fragment leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    State(StateId),
    Exit,
}

impl Target {
    /// Translate a concrete target by `offset`, leaving `Exit` untouched.
    pub fn shifted(self, offset: usize) -> Target {
        match self {
            Target::State(id) => Target::State(id + offset),
            Target::Exit => Target::Exit,
        }
    }

    /// Replace `Exit` with `to`.
    pub fn resolved(self, to: StateId) -> StateId {
        match self {
            Target::State(id) => id,
            Target::Exit => to,
        }
    }
}

/// A set of states backed by a bit set sized to the automaton.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with room for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, growing the set if needed. Returns true if the state
    /// was not already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        if state >= self.bits.len() {
            self.bits.grow(state + 1);
        }
        !self.bits.put(state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        state < self.bits.len() && self.bits.contains(state)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Iterate over the states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones()
    }

    /// Add every state of `other` to this set.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// True if the two sets share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }
}

// Sets with different capacities but the same members are equal.
impl PartialEq for StateSet {
    fn eq(&self, other: &StateSet) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = StateSet::default();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
