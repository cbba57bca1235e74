//! Simplification set: unit equations available for demodulation

use crate::clause::{ClauseContext, ClauseId};
use crate::index::{ClauseIndex, UnitRewriteIndex};

#[derive(Debug, Default)]
pub struct SimplSet {
    index: UnitRewriteIndex,
}

impl SimplSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every clause the rewrite index accepts; returns how many it took
    pub fn add(&mut self, ctx: &ClauseContext, ids: &[ClauseId]) -> usize {
        ids.iter().filter(|&&id| self.index.insert(ctx, id)).count()
    }

    pub fn remove(&mut self, ctx: &ClauseContext, ids: &[ClauseId]) -> usize {
        ids.iter().filter(|&&id| self.index.remove(ctx, id)).count()
    }

    pub fn index(&self) -> &UnitRewriteIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
