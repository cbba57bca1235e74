//! Clause arena and hashcons table
//!
//! One `ClauseContext` per prover run owns every clause. Clauses are
//! addressed by `ClauseId` and deduplicated on their canonical literal
//! sequence together with the ordering epoch: creating a clause that already
//! exists returns the first creator untouched.

use super::literal_set::LiteralSet;
use super::record::{Clause, ClauseFlags, ClauseId, ClauseRole, Provenance};
use crate::logic::{
    Interner, Kbo, Literal, LiteralSelector, NoSelection, TermOrder, Variable,
};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{trace, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClauseKey {
    literals: Arc<[Literal]>,
    epoch: u32,
}

/// Counters kept by the clause factory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    pub created: usize,
    pub hashcons_hits: usize,
    pub oversized: usize,
}

#[derive(Debug)]
pub struct ClauseContext {
    pub interner: Interner,
    clauses: Vec<Clause>,
    table: HashMap<ClauseKey, ClauseId>,
    ordering: Box<dyn TermOrder>,
    selector: Box<dyn LiteralSelector>,
    epoch: u32,
    incomplete: bool,
    trivial: ClauseId,
    stats: ContextStats,
}

impl Default for ClauseContext {
    fn default() -> Self {
        ClauseContext::new(Interner::new(), Box::new(Kbo::default()), Box::new(NoSelection))
    }
}

impl ClauseContext {
    /// Build a context. The canonical trivial clause `[$true]` is created
    /// first and always has id 0.
    pub fn new(
        interner: Interner,
        ordering: Box<dyn TermOrder>,
        selector: Box<dyn LiteralSelector>,
    ) -> Self {
        let mut ctx = ClauseContext {
            interner,
            clauses: Vec::new(),
            table: HashMap::new(),
            ordering,
            selector,
            epoch: 0,
            incomplete: false,
            trivial: ClauseId(0),
            stats: ContextStats::default(),
        };
        ctx.trivial = ctx.create(
            vec![Literal::True],
            Provenance::input(ClauseRole::Axiom).persistent(),
            &[],
            None,
        );
        ctx
    }

    /// Create (or find) the clause with these literals.
    ///
    /// Free variables are renumbered canonically first, so inputs equal up
    /// to variable renaming share one id. `selected`, when given, overrides
    /// the selection function; out-of-range indices are dropped.
    ///
    /// A literal sequence longer than `LiteralSet::CAPACITY` is not built:
    /// the trivial clause is returned and the context is marked incomplete.
    pub fn create(
        &mut self,
        literals: Vec<Literal>,
        provenance: Provenance,
        parents: &[ClauseId],
        selected: Option<LiteralSet>,
    ) -> ClauseId {
        if literals.len() > LiteralSet::CAPACITY {
            self.stats.oversized += 1;
            if !self.incomplete {
                warn!(
                    literals = literals.len(),
                    capacity = LiteralSet::CAPACITY,
                    "clause exceeds literal capacity, search is no longer complete"
                );
                self.incomplete = true;
            }
            return self.trivial;
        }

        let (literals, variables) = canonicalize(literals);
        let key = ClauseKey {
            literals: Arc::from(literals),
            epoch: self.epoch,
        };

        if let Some(&existing) = self.table.get(&key) {
            assert!(
                *self.clauses[existing.index()].literals == *key.literals,
                "hashcons table returned {} for a different literal sequence",
                existing
            );
            self.stats.hashcons_hits += 1;
            trace!(clause = %existing, "hashcons hit");
            return existing;
        }

        let id = next_id(self.clauses.len());
        let len = key.literals.len();
        let selected = match selected {
            Some(explicit) => explicit.truncate(len),
            None => self
                .selector
                .select(&key.literals, self.ordering.as_ref())
                .truncate(len),
        };
        let weight = key.literals.iter().map(Literal::weight).sum();

        let mut flags = ClauseFlags::empty();
        if variables.is_empty() {
            flags.insert(ClauseFlags::GROUND);
        }
        if provenance.role == ClauseRole::Lemma {
            flags.insert(ClauseFlags::LEMMA);
        }
        if provenance.persistent {
            flags.insert(ClauseFlags::PERSISTENT);
        }

        let distance_to_goal = if provenance.role == ClauseRole::NegatedConjecture {
            Some(0)
        } else {
            parents
                .iter()
                .filter_map(|p| self.clauses[p.index()].distance_to_goal)
                .min()
                .map(|d| d + 1)
        };

        for parent in parents {
            self.clauses[parent.index()].descendants.insert(id);
        }

        let clause = Clause {
            id,
            literals: Arc::clone(&key.literals),
            selected,
            flags,
            weight,
            variables,
            parents: parents.to_vec(),
            descendants: IndexSet::new(),
            provenance,
            distance_to_goal,
            epoch: self.epoch,
        };
        trace!(clause = %id, literals = %clause.display(&self.interner), weight, "created clause");
        self.clauses.push(clause);
        self.table.insert(key, id);
        self.stats.created += 1;
        id
    }

    /// Clause record for `id`. Panics on an id from another context.
    pub fn get(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.index()]
    }

    pub fn try_get(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.get(id.index())
    }

    /// Ids of clauses derived from `id`. Never shrinks.
    pub fn descendants(&self, id: ClauseId) -> &IndexSet<ClauseId> {
        &self.get(id).descendants
    }

    /// Add `extra` to the descendant set of `id`, skipping `id` itself
    pub(crate) fn extend_descendants(&mut self, id: ClauseId, extra: &IndexSet<ClauseId>) {
        let target = &mut self.clauses[id.index()].descendants;
        target.extend(extra.iter().copied().filter(|&d| d != id));
    }

    /// The canonical `[$true]` clause substituted for oversized clauses
    pub fn trivial(&self) -> ClauseId {
        self.trivial
    }

    /// Set once an oversized clause has been replaced. Never cleared.
    pub fn is_incomplete(&self) -> bool {
        self.incomplete
    }

    pub fn ordering(&self) -> &dyn TermOrder {
        self.ordering.as_ref()
    }

    pub fn selector(&self) -> &dyn LiteralSelector {
        self.selector.as_ref()
    }

    /// Switch to a new ordering. Existing clauses keep their selection;
    /// use `rederive` to rebuild one under the new ordering.
    pub fn set_ordering(&mut self, ordering: Box<dyn TermOrder>) {
        self.ordering = ordering;
        self.epoch += 1;
    }

    pub fn set_selector(&mut self, selector: Box<dyn LiteralSelector>) {
        self.selector = selector;
        self.epoch += 1;
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Re-create `id` under the current epoch. Returns `id` unchanged if it
    /// already belongs to the current epoch.
    pub fn rederive(&mut self, id: ClauseId) -> ClauseId {
        let clause = self.get(id);
        if clause.epoch == self.epoch {
            return id;
        }
        let literals = clause.literals.to_vec();
        let provenance = clause.provenance.clone();
        let parents = clause.parents.clone();
        self.create(literals, provenance, &parents, None)
    }

    /// Number of clauses in the arena, the trivial clause included
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn stats(&self) -> ContextStats {
        self.stats
    }
}

fn next_id(len: usize) -> ClauseId {
    ClauseId(u32::try_from(len).expect("clause id space exhausted"))
}

/// Renumber free variables 0, 1, ... in first-occurrence order across the
/// whole literal sequence
fn canonicalize(literals: Vec<Literal>) -> (Vec<Literal>, Vec<Variable>) {
    let mut seen = Vec::new();
    for lit in &literals {
        lit.collect_variables(&mut seen);
    }
    let canonical = seen.iter().enumerate().all(|(i, v)| v.id == i as u32);
    let variables: Vec<Variable> = (0..seen.len() as u32).map(Variable::new).collect();
    if canonical {
        return (literals, variables);
    }
    let mapping: HashMap<Variable, Variable> = seen
        .iter()
        .enumerate()
        .map(|(i, v)| (*v, Variable::new(i as u32)))
        .collect();
    let renamed = literals
        .iter()
        .map(|lit| lit.map_terms(|t| t.map_variables(&mut |v| mapping[&v])))
        .collect();
    (renamed, variables)
}
