use std::fmt;

use thiserror::Error;

use crate::index::{new_index, IndexedSet};

new_index!(pub index SymbolId);

/// The finite set of input symbols of an automaton.
///
/// Symbols are kept sorted, so the id of a symbol is its rank and two alphabets
/// holding the same symbols are indistinguishable.
#[derive(Clone, Default)]
pub struct Alphabet {
    symbols: IndexedSet<SymbolId, char>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        let mut symbols = symbols.into_iter().collect::<Vec<_>>();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols: symbols.into_iter().collect() }
    }

    /// ASCII letters and digits.
    pub fn alphanumeric() -> Self {
        Self::new(('a'..='z').chain('A'..='Z').chain('0'..='9'))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn id_of(&self, symbol: char) -> Option<SymbolId> {
        self.symbols.get_index_of(&symbol)
    }

    pub fn symbol(&self, id: SymbolId) -> char {
        self.symbols[id]
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + DoubleEndedIterator + ExactSizeIterator {
        (0..self.symbols.len()).map(SymbolId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, char)> + '_ {
        self.symbols.enumerate().map(|(id, &c)| (id, c))
    }

    /// Maps every character of `word` to its id, or `None` if some character
    /// is not part of the alphabet.
    pub fn encode(&self, word: &str) -> Option<Vec<SymbolId>> {
        word.chars().map(|c| self.id_of(c)).collect()
    }

    pub fn check_same(&self, other: &Alphabet) -> Result<(), AlphabetMismatch> {
        match self == other {
            true => Ok(()),
            false => Err(AlphabetMismatch { left: self.clone(), right: other.clone() }),
        }
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols.iter().eq(other.symbols.iter())
    }
}

impl Eq for Alphabet {}

impl FromIterator<char> for Alphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.symbols.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Two automata were combined although they read different alphabets.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("alphabet mismatch: {left} vs {right}")]
pub struct AlphabetMismatch {
    pub left: Alphabet,
    pub right: Alphabet,
}
