use crate::alphabet::AlphabetMismatch;
use crate::dfa::Dfa;
use crate::index::IndexedVec;
use crate::product::Product;
use crate::StateId;

impl Dfa {
    /// Adds an explicit non-accepting sink so that every transition is defined.
    /// Returns `self` unchanged if it is already complete.
    pub fn complete(&self) -> Dfa {
        if self.is_complete() {
            return self.clone();
        }

        let mut result = self.clone();
        let sink = result.add_state(false);
        for (_, row) in result.transitions.enumerate_mut() {
            for (_, next) in row.enumerate_mut() {
                next.get_or_insert(sink);
            }
        }
        result
    }

    /// Accepts exactly the words over the same alphabet that `self` rejects.
    pub fn complement(&self) -> Dfa {
        let mut result = self.complete();
        for (_, accepting) in result.accepting.enumerate_mut() {
            *accepting = !*accepting;
        }
        result
    }

    /// Accepts the words accepted by both automata.
    pub fn intersection(&self, other: &Dfa) -> Result<Dfa, AlphabetMismatch> {
        let product = Product::new(self, other)?;
        let search = product.search(|_, _| false);

        // Pairs with a sink component can never accept, so they are left implicit.
        let mut renumber = IndexedVec::<StateId, Option<StateId>>::new();
        let mut result = Dfa::new(self.alphabet.clone());
        for (_, &pair) in search.pairs.enumerate() {
            let id = match pair {
                (Some(_), Some(_)) if renumber.is_empty() => Some(StateId(0)),
                (Some(_), Some(_)) => Some(result.add_state(false)),
                _ => None,
            };
            renumber.push(id);
        }

        for (id, &pair) in search.pairs.enumerate() {
            let Some(from) = renumber[id] else { continue };
            let (left, right) = product.accepting(pair);
            result.set_accepting(from, left && right);

            for symbol in self.alphabet.ids() {
                let next = product.next(pair, symbol);
                let to = search.pairs.get_index_of(&next).and_then(|next| renumber[next]);
                if let Some(to) = to {
                    result.set_transition(from, symbol, to);
                }
            }
        }

        Ok(result)
    }
}
