use std::collections::VecDeque;

use crate::alphabet::{AlphabetMismatch, SymbolId};
use crate::dfa::Dfa;
use crate::index::{IndexedSet, IndexedVec};
use crate::StateId;

/// A state of the product automaton. `None` stands for the implicit sink of
/// the corresponding partial DFA.
pub type Pair = (Option<StateId>, Option<StateId>);

/// The synchronous product of two DFAs over the same alphabet, explored lazily.
pub struct Product<'a> {
    left: &'a Dfa,
    right: &'a Dfa,
}

/// The part of a product explored by [`Product::search`].
pub struct Search {
    /// Reached pairs, in breadth-first discovery order.
    pub pairs: IndexedSet<StateId, Pair>,
    /// How each pair was first reached: its predecessor and the symbol read.
    pub parents: IndexedVec<StateId, Option<(StateId, SymbolId)>>,
    /// The first pair satisfying the search predicate, if any.
    pub found: Option<StateId>,
}

impl<'a> Product<'a> {
    pub fn new(left: &'a Dfa, right: &'a Dfa) -> Result<Self, AlphabetMismatch> {
        left.alphabet().check_same(right.alphabet())?;
        Ok(Self { left, right })
    }

    pub fn start(&self) -> Pair {
        (Some(self.left.start()), Some(self.right.start()))
    }

    pub fn next(&self, (l, r): Pair, symbol: SymbolId) -> Pair {
        (l.and_then(|l| self.left.next(l, symbol)), r.and_then(|r| self.right.next(r, symbol)))
    }

    /// Whether the left and right components are accepting.
    pub fn accepting(&self, (l, r): Pair) -> (bool, bool) {
        (
            l.is_some_and(|l| self.left.is_accepting(l)),
            r.is_some_and(|r| self.right.is_accepting(r)),
        )
    }

    /// Breadth-first traversal from the start pair, stopping at the first pair
    /// for which `is_target` holds. The pair of both sinks is never expanded.
    pub fn search(&self, mut is_target: impl FnMut(&Self, Pair) -> bool) -> Search {
        let mut pairs = IndexedSet::<StateId, Pair>::default();
        let mut parents = IndexedVec::<StateId, Option<(StateId, SymbolId)>>::new();
        let mut queue = VecDeque::new();

        let (start, _) = pairs.insert_full(self.start());
        parents.push(None);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let pair = pairs[id];
            if is_target(self, pair) {
                return Search { pairs, parents, found: Some(id) };
            }
            if pair == (None, None) {
                continue;
            }

            for symbol in self.left.alphabet().ids() {
                let (next, is_new) = pairs.insert_full(self.next(pair, symbol));
                if is_new {
                    parents.push(Some((id, symbol)));
                    queue.push_back(next);
                }
            }
        }

        Search { pairs, parents, found: None }
    }
}

impl Search {
    /// The symbols read along the discovery path from the start to `id`.
    pub fn path_to(&self, mut id: StateId) -> Vec<SymbolId> {
        let mut path = Vec::new();
        while let Some((parent, symbol)) = self.parents[id] {
            path.push(symbol);
            id = parent;
        }
        path.reverse();
        path
    }
}
