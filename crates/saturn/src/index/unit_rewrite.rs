//! Unit rewrite index: positive unit equations usable as demodulators.
//!
//! An equation `l = r` with `l > r` is stored under `l` only. An equation
//! whose sides are incomparable (or equal) is stored under both sides, marked
//! unoriented, so a demodulator must check the ordering on the instance.
//!
//! The index remembers where it put each clause, so removal undoes exactly
//! what insertion did even if the ordering has changed in between.

use super::disc_tree::DiscTree;
use super::{ClauseIndex, TermIndex};
use crate::clause::{ClauseContext, ClauseId};
use crate::logic::{Comparison, Literal, Side, Term};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RewriteEntry {
    pub clause: ClauseId,
    /// Side of the equation the entry is keyed by; the other side is the
    /// replacement
    pub side: Side,
    pub oriented: bool,
}

#[derive(Debug, Default)]
pub struct UnitRewriteIndex {
    tree: DiscTree<RewriteEntry>,
    placed: HashMap<ClauseId, Vec<(Term, RewriteEntry)>>,
}

impl UnitRewriteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demodulators whose key side generalizes `term`
    pub fn candidates(&self, term: &Term) -> Vec<&RewriteEntry> {
        self.tree.retrieve_generalizations(term)
    }

    pub fn tree(&self) -> &DiscTree<RewriteEntry> {
        &self.tree
    }

    /// Entries that would be placed for `id` under the current ordering
    fn placements(ctx: &ClauseContext, id: ClauseId) -> Vec<(Term, RewriteEntry)> {
        let clause = ctx.get(id);
        let [Literal::Equation {
            lhs,
            rhs,
            positive: true,
        }] = &clause.literals[..]
        else {
            return Vec::new();
        };
        let entry = |side, oriented| RewriteEntry {
            clause: id,
            side,
            oriented,
        };
        match ctx.ordering().compare(lhs, rhs) {
            Comparison::Gt => vec![(lhs.clone(), entry(Side::Left, true))],
            Comparison::Lt => vec![(rhs.clone(), entry(Side::Right, true))],
            Comparison::Eq | Comparison::Incomparable => vec![
                (lhs.clone(), entry(Side::Left, false)),
                (rhs.clone(), entry(Side::Right, false)),
            ],
        }
    }
}

impl ClauseIndex for UnitRewriteIndex {
    fn insert(&mut self, ctx: &ClauseContext, id: ClauseId) -> bool {
        if self.placed.contains_key(&id) {
            return false;
        }
        let placements = Self::placements(ctx, id);
        if placements.is_empty() {
            return false;
        }
        for (term, entry) in &placements {
            self.tree.insert(term, entry.clone());
        }
        self.placed.insert(id, placements);
        true
    }

    fn remove(&mut self, _ctx: &ClauseContext, id: ClauseId) -> bool {
        let Some(placements) = self.placed.remove(&id) else {
            return false;
        };
        for (term, entry) in &placements {
            let removed = self.tree.remove(term, entry);
            debug_assert!(removed, "unit rewrite entry for {} missing", id);
        }
        true
    }

    fn contains(&self, id: ClauseId) -> bool {
        self.placed.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.placed.len()
    }
}
