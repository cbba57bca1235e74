//! Term and clause indices.
//!
//! Every index is maintained one entry at a time: `insert` adds exactly one
//! entry, `remove` takes out exactly one matching entry. Keeping the indices
//! coherent with the clause sets is the job of the owning set; the indices
//! only promise that removing what was inserted restores the previous
//! contents exactly.
//!
//! ## Index Kinds
//!
//! - `SupInto`: subterms of resolution-eligible literals (rewrite targets)
//! - `SupFrom`: maximal sides of paramodulation-eligible literals (rewriters)
//! - `BackDemod`: every subterm of every literal (backward demodulation targets)
//! - `Subsumption`: feature vectors of whole clauses
//! - `UnitRewrite`: oriented unit equations (demodulators)

pub mod disc_tree;
pub mod feature_vector;
pub mod unit_rewrite;

use crate::clause::{ClauseContext, ClauseId};
use crate::logic::{Side, Term, TermPath};
use serde::Serialize;

pub use disc_tree::{DiscTree, FlatKey};
pub use feature_vector::{FeatureVector, FeatureVectorIndex};
pub use unit_rewrite::{RewriteEntry, UnitRewriteIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    SupInto,
    SupFrom,
    BackDemod,
    Subsumption,
    UnitRewrite,
}

impl IndexKind {
    pub fn name(self) -> &'static str {
        match self {
            IndexKind::SupInto => "sup_into",
            IndexKind::SupFrom => "sup_from",
            IndexKind::BackDemod => "back_demod",
            IndexKind::Subsumption => "subsumption",
            IndexKind::UnitRewrite => "unit_rewrite",
        }
    }
}

/// Position of an indexed term: literal, side of the literal, and argument
/// path below that side
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TermEntry {
    pub clause: ClauseId,
    pub literal: usize,
    pub side: Side,
    pub path: TermPath,
}

impl TermEntry {
    /// The indexed term, looked up in the clause it points into
    pub fn term<'a>(&self, ctx: &'a ClauseContext) -> Option<&'a Term> {
        ctx.try_get(self.clause)?
            .literals
            .get(self.literal)?
            .side(self.side)?
            .at(&self.path)
    }
}

/// An index keyed by terms
pub trait TermIndex<V> {
    fn insert(&mut self, term: &Term, value: V);

    /// Remove one copy of `value` stored under `term`. Returns false if
    /// there was none.
    fn remove(&mut self, term: &Term, value: &V) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An index keyed by whole clauses
pub trait ClauseIndex {
    /// Index `id`. Returns false if the clause is not indexable here or is
    /// already present.
    fn insert(&mut self, ctx: &ClauseContext, id: ClauseId) -> bool;

    /// Returns false if `id` was not present.
    fn remove(&mut self, ctx: &ClauseContext, id: ClauseId) -> bool;

    fn contains(&self, id: ClauseId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
