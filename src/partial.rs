//! Partial automata and the Thompson combinators over them.
//!
//! A partial automaton is a state table with an entry state but no accept
//! state. Transitions that should lead to "whatever comes next" point at
//! [`Target::Exit`] instead of a state index. Every combinator consumes its
//! operands and returns a fresh table, shifting indices so that the merged
//! table stays dense.

use crate::nfa::{Nfa, State};
use crate::state::{StateId, StateSet, Target};
use std::collections::{BTreeMap, BTreeSet};

/// Destinations of one transition in a partial automaton.
pub type TargetSet = BTreeSet<Target>;

/// The outgoing transitions of one state under construction.
///
/// The epsilon set is a field rather than a map entry, so every state has one
/// even when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialState {
    pub epsilon: TargetSet,
    pub symbols: BTreeMap<char, TargetSet>,
}

impl PartialState {
    fn epsilon(targets: impl IntoIterator<Item = Target>) -> Self {
        PartialState {
            epsilon: targets.into_iter().collect(),
            symbols: BTreeMap::new(),
        }
    }

    fn target_sets_mut(&mut self) -> impl Iterator<Item = &mut TargetSet> {
        std::iter::once(&mut self.epsilon).chain(self.symbols.values_mut())
    }

    fn target_sets(&self) -> impl Iterator<Item = &TargetSet> {
        std::iter::once(&self.epsilon).chain(self.symbols.values())
    }

    /// A copy of this state with every concrete target moved by `offset`.
    fn shifted(&self, offset: usize) -> PartialState {
        let shift = |set: &TargetSet| -> TargetSet {
            set.iter().map(|t| t.shifted(offset)).collect()
        };
        PartialState {
            epsilon: shift(&self.epsilon),
            symbols: self
                .symbols
                .iter()
                .map(|(&sym, set)| (sym, shift(set)))
                .collect(),
        }
    }

    fn has_exit(&self) -> bool {
        self.target_sets().any(|set| set.contains(&Target::Exit))
    }
}

/// An automaton fragment under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialNfa {
    states: Vec<PartialState>,
    entry: StateId,
}

impl PartialNfa {
    /// Accepts exactly `symbol`: one state whose only transition leads to the
    /// exit.
    pub fn literal(symbol: char) -> Self {
        let mut state = PartialState::default();
        state.symbols.insert(symbol, TargetSet::from([Target::Exit]));
        PartialNfa {
            states: vec![state],
            entry: 0,
        }
    }

    /// Matches only the empty string: a single state that leads to the exit
    /// without consuming input.
    pub fn empty() -> Self {
        PartialNfa {
            states: vec![PartialState::epsilon([Target::Exit])],
            entry: 0,
        }
    }

    pub fn entry(&self) -> StateId {
        self.entry
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[PartialState] {
        &self.states
    }

    /// True while some transition still points at the exit placeholder.
    pub fn has_exits(&self) -> bool {
        self.states.iter().any(PartialState::has_exit)
    }

    /// The table with every concrete index moved by `offset`.
    fn shifted_states(&self, offset: usize) -> Vec<PartialState> {
        self.states.iter().map(|s| s.shifted(offset)).collect()
    }

    /// Point every exit placeholder at `to`.
    fn patch_exits(states: &mut [PartialState], to: StateId) {
        for set in states.iter_mut().flat_map(PartialState::target_sets_mut) {
            if set.remove(&Target::Exit) {
                set.insert(Target::State(to));
            }
        }
    }

    /// `a` followed by `b`.
    pub fn concatenate(a: PartialNfa, b: PartialNfa) -> PartialNfa {
        let offset = a.len();
        let mut states = a.states;
        PartialNfa::patch_exits(&mut states, b.entry + offset);
        states.extend(b.shifted_states(offset));
        PartialNfa {
            states,
            entry: a.entry,
        }
    }

    /// Either `a` or `b`, chosen by a new entry state.
    pub fn alternate(a: PartialNfa, b: PartialNfa) -> PartialNfa {
        let a_offset = 1;
        let b_offset = 1 + a.len();
        let entry = PartialState::epsilon([
            Target::State(a.entry + a_offset),
            Target::State(b.entry + b_offset),
        ]);

        let mut states = Vec::with_capacity(b_offset + b.len());
        states.push(entry);
        states.extend(a.shifted_states(a_offset));
        states.extend(b.shifted_states(b_offset));
        PartialNfa { states, entry: 0 }
    }

    /// `a` or nothing. The new entry state may skip straight to the exit.
    pub fn optional(a: PartialNfa) -> PartialNfa {
        let entry = PartialState::epsilon([Target::State(a.entry + 1), Target::Exit]);

        let mut states = Vec::with_capacity(1 + a.len());
        states.push(entry);
        states.extend(a.shifted_states(1));
        PartialNfa { states, entry: 0 }
    }

    /// Zero or more `a`. The exits of `a` loop back to the new entry state,
    /// which either enters `a` again or leaves.
    pub fn star(a: PartialNfa) -> PartialNfa {
        let entry = PartialState::epsilon([Target::State(a.entry + 1), Target::Exit]);

        let mut body = a.shifted_states(1);
        PartialNfa::patch_exits(&mut body, 0);

        let mut states = Vec::with_capacity(1 + body.len());
        states.push(entry);
        states.extend(body);
        PartialNfa { states, entry: 0 }
    }

    /// One or more `a`. The exits of `a` lead to a new trailing state, which
    /// either repeats `a` or leaves.
    pub fn plus(a: PartialNfa) -> PartialNfa {
        let tail = a.len();
        let entry = a.entry;
        let mut states = a.states;
        PartialNfa::patch_exits(&mut states, tail);
        states.push(PartialState::epsilon([Target::State(entry), Target::Exit]));
        PartialNfa { states, entry }
    }

    /// Resolve every exit to a new accept state and freeze the result.
    ///
    /// The alphabet is every non-epsilon symbol that labels a transition.
    pub fn finish(self) -> Nfa {
        let alphabet: BTreeSet<char> = self
            .states
            .iter()
            .flat_map(|s| s.symbols.keys().copied())
            .collect();

        let accept = self.states.len();
        let capacity = accept + 1;
        let resolve = |set: &TargetSet| -> StateSet {
            let mut resolved = StateSet::with_capacity(capacity);
            for target in set {
                resolved.insert(target.resolved(accept));
            }
            resolved
        };

        let mut states: Vec<State> = self
            .states
            .iter()
            .map(|s| State {
                epsilon: resolve(&s.epsilon),
                symbols: s.symbols.iter().map(|(&sym, set)| (sym, resolve(set))).collect(),
            })
            .collect();
        states.push(State::new(capacity));

        Nfa::new(
            states,
            self.entry,
            StateSet::singleton(accept, capacity),
            alphabet,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(ts: &[Target]) -> TargetSet {
        ts.iter().copied().collect()
    }

    #[test]
    fn test_literal() {
        let a = PartialNfa::literal('a');
        assert_eq!(a.len(), 1);
        assert_eq!(a.entry(), 0);
        assert!(a.states()[0].epsilon.is_empty());
        assert_eq!(a.states()[0].symbols[&'a'], targets(&[Target::Exit]));
    }

    #[test]
    fn test_concatenate_shifts_and_patches() {
        let ab = PartialNfa::concatenate(PartialNfa::literal('a'), PartialNfa::literal('b'));
        assert_eq!(ab.len(), 2);
        assert_eq!(ab.entry(), 0);
        assert_eq!(ab.states()[0].symbols[&'a'], targets(&[Target::State(1)]));
        assert_eq!(ab.states()[1].symbols[&'b'], targets(&[Target::Exit]));
    }

    #[test]
    fn test_alternate() {
        let ab = PartialNfa::concatenate(PartialNfa::literal('a'), PartialNfa::literal('b'));
        let alt = PartialNfa::alternate(ab, PartialNfa::literal('c'));
        assert_eq!(alt.len(), 4);
        assert_eq!(alt.entry(), 0);
        assert_eq!(
            alt.states()[0].epsilon,
            targets(&[Target::State(1), Target::State(3)])
        );
        assert_eq!(alt.states()[1].symbols[&'a'], targets(&[Target::State(2)]));
        assert_eq!(alt.states()[2].symbols[&'b'], targets(&[Target::Exit]));
        assert_eq!(alt.states()[3].symbols[&'c'], targets(&[Target::Exit]));
    }

    #[test]
    fn test_optional_keeps_skip_exit() {
        let opt = PartialNfa::optional(PartialNfa::literal('a'));
        assert_eq!(
            opt.states()[0].epsilon,
            targets(&[Target::State(1), Target::Exit])
        );
        assert_eq!(opt.states()[1].symbols[&'a'], targets(&[Target::Exit]));
    }

    #[test]
    fn test_star_loops_back() {
        let star = PartialNfa::star(PartialNfa::literal('a'));
        assert_eq!(star.entry(), 0);
        assert_eq!(
            star.states()[0].epsilon,
            targets(&[Target::State(1), Target::Exit])
        );
        assert_eq!(star.states()[1].symbols[&'a'], targets(&[Target::State(0)]));
    }

    #[test]
    fn test_plus_appends_tail() {
        let plus = PartialNfa::plus(PartialNfa::literal('a'));
        assert_eq!(plus.len(), 2);
        assert_eq!(plus.entry(), 0);
        assert_eq!(plus.states()[0].symbols[&'a'], targets(&[Target::State(1)]));
        assert_eq!(
            plus.states()[1].epsilon,
            targets(&[Target::State(0), Target::Exit])
        );
    }

    #[test]
    fn test_finish_resolves_every_exit() {
        let p = PartialNfa::optional(PartialNfa::plus(PartialNfa::literal('a')));
        assert!(p.has_exits());
        let nfa = p.finish();
        let accept = nfa.len() - 1;
        assert!(nfa.accepting().contains(accept));
        assert_eq!(nfa.accepting().len(), 1);
        assert!(nfa.states()[accept].epsilon.is_empty());
        assert!(nfa.states()[accept].symbols.is_empty());
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a']);
        assert!(nfa.states()[0].epsilon.contains(accept));
    }
}
