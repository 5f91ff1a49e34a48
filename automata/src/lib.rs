pub mod alphabet;
pub mod determinize;
pub mod dfa;
mod dot;
pub mod index;
pub mod minimize;
pub mod nfa;
mod ops;
pub mod product;


use index::new_index;

pub use alphabet::{Alphabet, AlphabetMismatch, SymbolId};
pub use determinize::determinize;
pub use dfa::Dfa;
pub use minimize::minimize;
pub use nfa::Nfa;

pub type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;

new_index!(pub index StateId);

impl Nfa {
    pub fn determinize(&self) -> Dfa {
        determinize(self)
    }
}

impl Dfa {
    pub fn minimize(&self) -> Dfa {
        minimize(self)
    }
}
