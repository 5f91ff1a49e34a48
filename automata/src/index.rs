use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::ops::{Deref, Index, IndexMut};

use crate::Set;

/// Typed ids for states, symbols and blocks. Each one is a dense position in
/// some arena, starting from zero.
pub trait AsIndex: Copy + Eq + Hash {
    fn to_usize(&self) -> usize;
    fn from_usize(index: usize) -> Self;
}

/// Ids are stored shifted by one so that `Option<Id>` stays four bytes wide.
pub const fn raw_index(index: usize) -> NonZeroU32 {
    assert!(index < u32::MAX as usize, "too many elements for a 32-bit id");
    match NonZeroU32::new(index as u32 + 1) {
        Some(raw) => raw,
        None => unreachable!(),
    }
}

macro_rules! new_index {
    ($(#[$meta:meta])* $vis:vis index $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name {
            raw: ::std::num::NonZeroU32,
        }

        #[allow(non_snake_case)]
        $vis const fn $name(index: usize) -> $name {
            $name { raw: $crate::index::raw_index(index) }
        }

        impl $crate::index::AsIndex for $name {
            fn to_usize(&self) -> usize {
                self.raw.get() as usize - 1
            }

            fn from_usize(index: usize) -> Self {
                $name(index)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), $crate::index::AsIndex::to_usize(self))
            }
        }
    };
}
pub(crate) use new_index;

/// Per-id storage: position `i` holds the value for the id `I::from_usize(i)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IndexedVec<I, T> {
    raw: Vec<T>,
    _id: PhantomData<fn(I) -> I>,
}

impl<I, T> Default for IndexedVec<I, T> {
    fn default() -> Self {
        Self { raw: Vec::new(), _id: PhantomData }
    }
}

impl<I: AsIndex, T> IndexedVec<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` and returns the id it was stored under.
    pub fn push(&mut self, value: T) -> I {
        self.raw.push(value);
        I::from_usize(self.raw.len() - 1)
    }

    pub fn indexes(
        &self,
    ) -> impl Iterator<Item = I> + DoubleEndedIterator + ExactSizeIterator + Clone {
        (0..self.raw.len()).map(I::from_usize)
    }

    pub fn contains_index(&self, index: I) -> bool {
        index.to_usize() < self.raw.len()
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (I, &T)> + DoubleEndedIterator + ExactSizeIterator {
        self.indexes().zip(&self.raw)
    }

    pub fn enumerate_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> + ExactSizeIterator {
        (0..self.raw.len()).map(I::from_usize).zip(&mut self.raw)
    }
}

impl<I, T> Deref for IndexedVec<I, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.raw
    }
}

impl<I: AsIndex, T> Index<I> for IndexedVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        &self.raw[index.to_usize()]
    }
}

impl<I: AsIndex, T> IndexMut<I> for IndexedVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.to_usize()]
    }
}

impl<I, T> From<Vec<T>> for IndexedVec<I, T> {
    fn from(raw: Vec<T>) -> Self {
        Self { raw, _id: PhantomData }
    }
}

impl<I, T> FromIterator<T> for IndexedVec<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<I, T: fmt::Debug> fmt::Debug for IndexedVec<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.raw).finish()
    }
}

/// Interns values: each distinct value gets the id of its first insertion.
#[derive(Clone)]
pub struct IndexedSet<I, T> {
    raw: Set<T>,
    _id: PhantomData<fn(I) -> I>,
}

impl<I, T> Default for IndexedSet<I, T> {
    fn default() -> Self {
        Self { raw: Set::default(), _id: PhantomData }
    }
}

impl<I: AsIndex, T: Hash + Eq> IndexedSet<I, T> {
    /// Returns the id of `value` and whether it was newly inserted.
    pub fn insert_full(&mut self, value: T) -> (I, bool) {
        let (index, is_new) = self.raw.insert_full(value);
        (I::from_usize(index), is_new)
    }

    pub fn get_index_of<Q>(&self, value: &Q) -> Option<I>
    where
        Q: indexmap::Equivalent<T> + Hash + ?Sized,
    {
        self.raw.get_index_of(value).map(I::from_usize)
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (I, &T)> + ExactSizeIterator {
        (0..self.raw.len()).map(I::from_usize).zip(&self.raw)
    }
}

impl<I, T> Deref for IndexedSet<I, T> {
    type Target = Set<T>;

    fn deref(&self) -> &Set<T> {
        &self.raw
    }
}

impl<I, T: Hash + Eq> FromIterator<T> for IndexedSet<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self { raw: iter.into_iter().collect(), _id: PhantomData }
    }
}

impl<I: AsIndex, T> Index<I> for IndexedSet<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        &self.raw[index.to_usize()]
    }
}
