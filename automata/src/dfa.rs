use std::collections::VecDeque;

use crate::alphabet::{Alphabet, SymbolId};
use crate::index::IndexedVec;
use crate::StateId;

/// A deterministic automaton with a partial transition function: a missing
/// entry sends the input to an implicit, non-accepting sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Alphabet,
    pub(crate) start: StateId,
    pub(crate) accepting: IndexedVec<StateId, bool>,
    pub(crate) transitions: IndexedVec<StateId, IndexedVec<SymbolId, Option<StateId>>>,
}

impl Dfa {
    /// Creates an automaton with a single non-accepting start state and no transitions.
    pub fn new(alphabet: Alphabet) -> Self {
        let row = vec![None; alphabet.len()].into();
        Self {
            alphabet,
            start: StateId(0),
            accepting: IndexedVec::from(vec![false]),
            transitions: IndexedVec::from(vec![row]),
        }
    }

    pub fn add_state(&mut self, accepting: bool) -> StateId {
        self.transitions.push(vec![None; self.alphabet.len()].into());
        self.accepting.push(accepting)
    }

    /// Sets the target of `from` on `symbol`, replacing any previous one.
    pub fn set_transition(&mut self, from: StateId, symbol: SymbolId, to: StateId) {
        assert!(self.transitions.contains_index(to), "transition target {to:?} does not exist");
        self.transitions[from][symbol] = Some(to);
    }

    pub fn set_start(&mut self, start: StateId) {
        assert!(self.transitions.contains_index(start), "start state {start:?} does not exist");
        self.start = start;
    }

    pub fn set_accepting(&mut self, state: StateId, accepting: bool) {
        self.accepting[state] = accepting;
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> + ExactSizeIterator + Clone {
        self.transitions.indexes()
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting[state]
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.enumerate().filter(|&(_, &acc)| acc).map(|(state, _)| state)
    }

    pub fn next(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions[state][symbol]
    }

    /// The defined transitions of `state`, in alphabet order.
    pub fn edges(&self, state: StateId) -> impl Iterator<Item = (SymbolId, StateId)> + '_ {
        self.transitions[state].enumerate().filter_map(|(symbol, &next)| Some((symbol, next?)))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.iter().map(|row| row.iter().flatten().count()).sum()
    }

    /// Whether every state has a transition on every symbol.
    pub fn is_complete(&self) -> bool {
        self.transitions.iter().all(|row| row.iter().all(Option::is_some))
    }

    pub fn run(&self, word: &[SymbolId]) -> Option<StateId> {
        word.iter().try_fold(self.start, |state, &symbol| self.next(state, symbol))
    }

    pub fn accepts(&self, word: &str) -> bool {
        self.alphabet
            .encode(word)
            .and_then(|word| self.run(&word))
            .is_some_and(|state| self.accepting[state])
    }

    /// States reachable from the start, flagged in a per-state table.
    pub fn reachable(&self) -> IndexedVec<StateId, bool> {
        let mut seen: IndexedVec<StateId, bool> = IndexedVec::from(vec![false; self.state_count()]);
        let mut queue = VecDeque::from([self.start]);
        seen[self.start] = true;

        while let Some(state) = queue.pop_front() {
            for (_, next) in self.edges(state) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    /// States from which some accepting state can be reached.
    pub fn live(&self) -> IndexedVec<StateId, bool> {
        let mut predecessors: IndexedVec<StateId, Vec<StateId>> =
            IndexedVec::from(vec![Vec::new(); self.state_count()]);
        for state in self.states() {
            for (_, next) in self.edges(state) {
                predecessors[next].push(state);
            }
        }

        let mut live = self.accepting.clone();
        let mut queue = self.accepting_states().collect::<Vec<_>>();

        while let Some(state) = queue.pop() {
            for &pred in &predecessors[state] {
                if !live[pred] {
                    live[pred] = true;
                    queue.push(pred);
                }
            }
        }

        live
    }

    /// Keeps only the states flagged in `keep`, renumbered in their original
    /// order. Transitions into dropped states are removed.
    pub(crate) fn retain_states(&self, keep: &IndexedVec<StateId, bool>) -> Dfa {
        assert!(keep[self.start], "the start state must be kept");

        let mut renumber: IndexedVec<StateId, Option<StateId>> =
            IndexedVec::from(vec![None; self.state_count()]);
        let mut result = Dfa {
            alphabet: self.alphabet.clone(),
            start: StateId(0),
            accepting: IndexedVec::new(),
            transitions: IndexedVec::new(),
        };

        for state in self.states().filter(|&state| keep[state]) {
            renumber[state] = Some(result.add_state(self.accepting[state]));
        }

        for state in self.states() {
            let Some(from) = renumber[state] else { continue };
            for (symbol, next) in self.edges(state) {
                if let Some(to) = renumber[next] {
                    result.set_transition(from, symbol, to);
                }
            }
        }

        result.start = renumber[self.start].expect("start state was kept");
        result
    }
}
