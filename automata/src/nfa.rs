use crate::alphabet::{Alphabet, SymbolId};
use crate::index::{AsIndex, IndexedVec};
use crate::{Set, StateId};

/// A non-deterministic automaton. Edges labelled `None` are epsilon transitions.
#[derive(Clone, Debug)]
pub struct Nfa {
    pub(crate) alphabet: Alphabet,
    pub(crate) start: StateId,
    pub(crate) accepting: IndexedVec<StateId, bool>,
    pub(crate) transitions: IndexedVec<StateId, Vec<(Option<SymbolId>, StateId)>>,
}

impl Nfa {
    /// Creates an automaton with a single non-accepting start state.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            start: StateId(0),
            accepting: IndexedVec::from(vec![false]),
            transitions: IndexedVec::from(vec![Vec::new()]),
        }
    }

    pub fn add_state(&mut self, accepting: bool) -> StateId {
        self.transitions.push(Vec::new());
        self.accepting.push(accepting)
    }

    pub fn add_transition(&mut self, from: StateId, label: Option<SymbolId>, to: StateId) {
        assert!(self.transitions.contains_index(to), "transition target {to:?} does not exist");
        if let Some(symbol) = label {
            assert!(symbol.to_usize() < self.alphabet.len(), "symbol {symbol:?} not in alphabet");
        }
        self.transitions[from].push((label, to));
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

    pub fn edges(&self, state: StateId) -> &[(Option<SymbolId>, StateId)] {
        &self.transitions[state]
    }

    /// Every state reachable from `states` through epsilon transitions only,
    /// `states` included. Returned sorted so it can be used as a set key.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = StateId>) -> Vec<StateId> {
        let mut closure = Set::default();
        let mut queue = Vec::new();

        for state in states {
            if closure.insert(state) {
                queue.push(state);
            }
        }

        while let Some(state) = queue.pop() {
            for &(label, next) in &self.transitions[state] {
                if label.is_none() && closure.insert(next) {
                    queue.push(next);
                }
            }
        }

        let mut closure = closure.into_iter().collect::<Vec<_>>();
        closure.sort_unstable();
        closure
    }

    /// The states reached from `states` by reading `symbol`, without closing over epsilons.
    pub fn step<'a>(
        &'a self,
        states: &'a [StateId],
        symbol: SymbolId,
    ) -> impl Iterator<Item = StateId> + 'a {
        states.iter().flat_map(move |&state| {
            self.transitions[state]
                .iter()
                .filter(move |&&(label, _)| label == Some(symbol))
                .map(|&(_, next)| next)
        })
    }

    pub fn accepts(&self, word: &str) -> bool {
        let Some(word) = self.alphabet.encode(word) else { return false };

        let mut current = self.epsilon_closure([self.start]);
        for symbol in word {
            if current.is_empty() {
                return false;
            }
            let next = self.step(&current, symbol).collect::<Vec<_>>();
            current = self.epsilon_closure(next);
        }

        current.iter().any(|&state| self.accepting[state])
    }
}
