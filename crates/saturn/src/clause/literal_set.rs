//! Fixed-width bitset over literal indices

use serde::{Deserialize, Serialize};
use std::fmt;

/// Set of literal indices within one clause.
///
/// The width is also the hard cap on clause length: a clause with more
/// literals than `CAPACITY` is never built.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiteralSet(u64);

impl LiteralSet {
    pub const CAPACITY: usize = 64;

    pub fn empty() -> Self {
        LiteralSet(0)
    }

    /// `{0, 1, ..., len - 1}`
    pub fn all(len: usize) -> Self {
        debug_assert!(len <= Self::CAPACITY);
        if len >= Self::CAPACITY {
            LiteralSet(u64::MAX)
        } else {
            LiteralSet((1u64 << len) - 1)
        }
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = LiteralSet::empty();
        for i in indices {
            set.insert(i);
        }
        set
    }

    pub fn insert(&mut self, i: usize) {
        assert!(i < Self::CAPACITY, "literal index {} out of range", i);
        self.0 |= 1 << i;
    }

    pub fn remove(&mut self, i: usize) {
        if i < Self::CAPACITY {
            self.0 &= !(1 << i);
        }
    }

    pub fn contains(&self, i: usize) -> bool {
        i < Self::CAPACITY && self.0 & (1 << i) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn intersection(self, other: LiteralSet) -> LiteralSet {
        LiteralSet(self.0 & other.0)
    }

    pub fn union(self, other: LiteralSet) -> LiteralSet {
        LiteralSet(self.0 | other.0)
    }

    pub fn is_subset(&self, other: &LiteralSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Drop every index >= `len`
    pub fn truncate(self, len: usize) -> LiteralSet {
        self.intersection(LiteralSet::all(len.min(Self::CAPACITY)))
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let bits = self.0;
        (0..Self::CAPACITY).filter(move |i| bits & (1 << i) != 0)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LiteralSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for LiteralSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        LiteralSet::from_indices(iter)
    }
}
