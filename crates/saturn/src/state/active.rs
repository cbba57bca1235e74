//! Active set: clauses that have been given, with the indices generating
//! inferences search.
//!
//! ## Indexed positions
//!
//! For each literal the *indexed sides* follow the ordering: an equation
//! with `lhs > rhs` contributes only `lhs`, with `lhs < rhs` only `rhs`,
//! and an unorientable equation both sides. A propositional literal
//! contributes its atom.
//!
//! - **sup-into**: every non-variable subterm of the indexed sides of
//!   resolution-eligible literals
//! - **sup-from**: the indexed sides themselves (roots only) of
//!   paramodulation-eligible literals
//! - **back-demod**: every non-variable subterm of both sides of every
//!   literal, eligible or not
//! - **subsumption**: the clause's feature vector
//!
//! Each clause remembers the exact entries it put into the term indices,
//! and `remove` replays them, so an add followed by a remove leaves every
//! index as it was.

use crate::clause::{ClauseContext, ClauseId, LiteralSet};
use crate::index::{ClauseIndex, DiscTree, FeatureVectorIndex, FlatKey, IndexKind, TermEntry, TermIndex};
use crate::logic::{Comparison, Literal, ScopedSubstitution, Side, Term, TermOrder};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

/// The term indices of the active set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tree {
    SupInto,
    SupFrom,
    BackDemod,
}

impl Tree {
    fn kind(self) -> IndexKind {
        match self {
            Tree::SupInto => IndexKind::SupInto,
            Tree::SupFrom => IndexKind::SupFrom,
            Tree::BackDemod => IndexKind::BackDemod,
        }
    }
}

#[derive(Debug, Clone)]
struct Placement {
    tree: Tree,
    term: Term,
    entry: TermEntry,
}

/// Size counters for the active set and its indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveStats {
    pub size: usize,
    pub added: usize,
    pub removed: usize,
    pub sup_into: usize,
    pub sup_from: usize,
    pub back_demod: usize,
    pub subsumption: usize,
}

/// Sorted contents of every active index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub clauses: Vec<ClauseId>,
    pub sup_into: Vec<(Vec<FlatKey>, TermEntry)>,
    pub sup_from: Vec<(Vec<FlatKey>, TermEntry)>,
    pub back_demod: Vec<(Vec<FlatKey>, TermEntry)>,
    pub subsumption: Vec<ClauseId>,
}

#[derive(Debug, Default)]
pub struct ActiveSet {
    clauses: IndexMap<ClauseId, Vec<Placement>>,
    sup_into: DiscTree<TermEntry>,
    sup_from: DiscTree<TermEntry>,
    back_demod: DiscTree<TermEntry>,
    subsumption: FeatureVectorIndex,
    added: usize,
    removed: usize,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add clauses not yet present and index them. Returns the ids that were
    /// actually added, in order.
    pub fn add(&mut self, ctx: &ClauseContext, ids: &[ClauseId]) -> Vec<ClauseId> {
        let mut added = Vec::new();
        for &id in ids {
            if self.clauses.contains_key(&id) {
                continue;
            }
            let placements = placements(ctx, id);
            for p in &placements {
                self.tree_mut(p.tree).insert(&p.term, p.entry.clone());
            }
            self.subsumption.insert(ctx, id);
            trace!(clause = %id, entries = placements.len(), "indexed active clause");
            self.clauses.insert(id, placements);
            self.added += 1;
            added.push(id);
        }
        added
    }

    /// Remove present clauses, undoing exactly what `add` indexed. Returns
    /// the ids that were actually removed.
    pub fn remove(&mut self, ctx: &ClauseContext, ids: &[ClauseId]) -> Vec<ClauseId> {
        let mut removed = Vec::new();
        for &id in ids {
            let Some(placements) = self.clauses.shift_remove(&id) else {
                continue;
            };
            for p in &placements {
                let found = self.tree_mut(p.tree).remove(&p.term, &p.entry);
                debug_assert!(found, "{} entry for {} missing", p.tree.kind().name(), id);
            }
            self.subsumption.remove(ctx, id);
            trace!(clause = %id, "unindexed active clause");
            self.removed += 1;
            removed.push(id);
        }
        removed
    }

    fn tree_mut(&mut self, tree: Tree) -> &mut DiscTree<TermEntry> {
        match tree {
            Tree::SupInto => &mut self.sup_into,
            Tree::SupFrom => &mut self.sup_from,
            Tree::BackDemod => &mut self.back_demod,
        }
    }

    pub fn contains(&self, id: ClauseId) -> bool {
        self.clauses.contains_key(&id)
    }

    /// Clause ids in insertion order
    pub fn clauses(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.clauses.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn sup_into(&self) -> &DiscTree<TermEntry> {
        &self.sup_into
    }

    pub fn sup_from(&self) -> &DiscTree<TermEntry> {
        &self.sup_from
    }

    pub fn back_demod(&self) -> &DiscTree<TermEntry> {
        &self.back_demod
    }

    pub fn subsumption(&self) -> &FeatureVectorIndex {
        &self.subsumption
    }

    pub fn snapshot(&self) -> ActiveSnapshot {
        let mut clauses: Vec<_> = self.clauses().collect();
        clauses.sort();
        ActiveSnapshot {
            clauses,
            sup_into: self.sup_into.entries(),
            sup_from: self.sup_from.entries(),
            back_demod: self.back_demod.entries(),
            subsumption: self.subsumption.entries().into_iter().map(|(id, _)| id).collect(),
        }
    }

    /// A fresh active set holding the same clauses, indexed from scratch
    pub fn rebuilt(&self, ctx: &ClauseContext) -> ActiveSet {
        let ids: Vec<_> = self.clauses().collect();
        let mut fresh = ActiveSet::new();
        fresh.add(ctx, &ids);
        fresh
    }

    pub fn stats(&self) -> ActiveStats {
        ActiveStats {
            size: self.clauses.len(),
            added: self.added,
            removed: self.removed,
            sup_into: self.sup_into.len(),
            sup_from: self.sup_from.len(),
            back_demod: self.back_demod.len(),
            subsumption: self.subsumption.len(),
        }
    }
}

/// Sides of `lit` that take part in ordered inferences
pub fn indexed_sides<'a>(lit: &'a Literal, ordering: &dyn TermOrder) -> Vec<(Side, &'a Term)> {
    match lit {
        Literal::Equation { lhs, rhs, .. } => match ordering.compare(lhs, rhs) {
            Comparison::Gt => vec![(Side::Left, lhs)],
            Comparison::Lt => vec![(Side::Right, rhs)],
            Comparison::Eq | Comparison::Incomparable => {
                vec![(Side::Left, lhs), (Side::Right, rhs)]
            }
        },
        _ => lit.sides(),
    }
}

fn placements(ctx: &ClauseContext, id: ClauseId) -> Vec<Placement> {
    let clause = ctx.get(id);
    let (resolution, paramodulation) = indexed_literals(ctx, id);
    let mut out = Vec::new();

    for (i, lit) in clause.literals.iter().enumerate() {
        let indexed = indexed_sides(lit, ctx.ordering());
        if resolution.contains(i) {
            for &(side, term) in &indexed {
                push_subterms(&mut out, Tree::SupInto, id, i, side, term);
            }
        }
        if paramodulation.contains(i) {
            for &(side, term) in &indexed {
                out.push(Placement {
                    tree: Tree::SupFrom,
                    term: term.clone(),
                    entry: entry(id, i, side, Vec::new()),
                });
            }
        }
        for (side, term) in lit.sides() {
            push_subterms(&mut out, Tree::BackDemod, id, i, side, term);
        }
    }
    out
}

fn push_subterms(
    out: &mut Vec<Placement>,
    tree: Tree,
    id: ClauseId,
    literal: usize,
    side: Side,
    term: &Term,
) {
    for (path, sub) in term.subterms_with_paths() {
        if sub.is_variable() {
            continue;
        }
        out.push(Placement {
            tree,
            term: sub.clone(),
            entry: entry(id, literal, side, path),
        });
    }
}

fn entry(clause: ClauseId, literal: usize, side: Side, path: Vec<usize>) -> TermEntry {
    TermEntry {
        clause,
        literal,
        side,
        path,
    }
}

/// Eligible-literal masks that the active set indexes `id` under
pub fn indexed_literals(ctx: &ClauseContext, id: ClauseId) -> (LiteralSet, LiteralSet) {
    let identity = ScopedSubstitution::new();
    (
        ctx.eligible_for_resolution(id, &identity, 0),
        ctx.eligible_for_paramodulation(id, &identity, 0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ClauseRole, Provenance};

    struct Fixture {
        ctx: ClauseContext,
        f: crate::logic::FunctionId,
        p: crate::logic::FunctionId,
        a: Term,
        b: Term,
    }

    fn fixture() -> Fixture {
        let mut ctx = ClauseContext::default();
        let f = ctx.interner.intern_function("f");
        let p = ctx.interner.intern_function("p");
        let a = Term::constant(ctx.interner.intern_constant("a"));
        let b = Term::constant(ctx.interner.intern_constant("b"));
        Fixture { ctx, f, p, a, b }
    }

    fn axiom(ctx: &mut ClauseContext, literals: Vec<Literal>) -> ClauseId {
        ctx.create(literals, Provenance::input(ClauseRole::Axiom), &[], None)
    }

    #[test]
    fn test_oriented_equation_indexes_greater_side() {
        let mut fx = fixture();
        // f(a) = b with f(a) > b
        let fa = Term::app(fx.f, vec![fx.a.clone()]);
        let id = axiom(&mut fx.ctx, vec![Literal::equal(fa.clone(), fx.b.clone())]);

        let mut active = ActiveSet::new();
        assert_eq!(active.add(&fx.ctx, &[id]), vec![id]);

        // sup-into: f(a) and a; sup-from: f(a); back-demod: f(a), a, b
        assert_eq!(active.sup_into().len(), 2);
        assert_eq!(active.sup_from().len(), 1);
        assert_eq!(active.back_demod().len(), 3);
        assert_eq!(active.subsumption().len(), 1);

        let from = active.sup_from().retrieve_unifiable(&fa);
        assert_eq!(from.len(), 1);
        assert_eq!(from[0].side, Side::Left);
        assert!(active.sup_from().retrieve_unifiable(&fx.b).is_empty());
        assert!(!active.back_demod().retrieve_generalizations(&fx.b).is_empty());
    }

    #[test]
    fn test_each_placement_lands_in_its_own_tree() {
        let mut fx = fixture();
        let fa = Term::app(fx.f, vec![fx.a.clone()]);
        let id = axiom(&mut fx.ctx, vec![Literal::equal(fa, fx.b.clone())]);
        let recorded = placements(&fx.ctx, id);
        let count = |tree: Tree| recorded.iter().filter(|p| p.tree == tree).count();

        let mut active = ActiveSet::new();
        active.add(&fx.ctx, &[id]);
        assert_eq!(active.sup_into().len(), count(Tree::SupInto));
        assert_eq!(active.sup_from().len(), count(Tree::SupFrom));
        assert_eq!(active.back_demod().len(), count(Tree::BackDemod));
        assert_eq!(recorded.len(), 6);

        active.remove(&fx.ctx, &[id]);
        assert!(active.sup_into().is_empty());
        assert!(active.sup_from().is_empty());
        assert!(active.back_demod().is_empty());
    }

    #[test]
    fn test_variables_not_indexed_as_subterms() {
        let mut fx = fixture();
        // p(X, a) with both arguments below the atom
        let atom = Term::app(fx.p, vec![Term::var(0), fx.a.clone()]);
        let id = axiom(&mut fx.ctx, vec![Literal::pos(atom.clone())]);
        let mut active = ActiveSet::new();
        active.add(&fx.ctx, &[id]);
        // p(X, a) and a
        assert_eq!(active.sup_into().len(), 2);
        assert_eq!(active.back_demod().len(), 2);
        for (_, entry) in active.sup_into().entries() {
            assert!(!entry.term(&fx.ctx).unwrap().is_variable());
        }
    }

    #[test]
    fn test_selection_limits_sup_into_and_sup_from() {
        let mut fx = fixture();
        let pa = Term::app(fx.p, vec![fx.a.clone()]);
        let pb = Term::app(fx.p, vec![fx.b.clone()]);
        // ~p(a) | p(b) with ~p(a) selected
        let id = fx.ctx.create(
            vec![Literal::neg(pa), Literal::pos(pb)],
            Provenance::input(ClauseRole::Axiom),
            &[],
            Some(LiteralSet::from_indices([0])),
        );
        let mut active = ActiveSet::new();
        active.add(&fx.ctx, &[id]);
        let into = active.sup_into().entries();
        assert_eq!(into.len(), 2);
        assert!(into.iter().all(|(_, e)| e.literal == 0));
        assert!(active.sup_from().is_empty());
        assert_eq!(active.back_demod().len(), 4);
    }

    #[test]
    fn test_add_skips_present_and_remove_restores() {
        let mut fx = fixture();
        let fa = Term::app(fx.f, vec![fx.a.clone()]);
        let c1 = axiom(&mut fx.ctx, vec![Literal::equal(fa, fx.b.clone())]);
        let c2 = axiom(&mut fx.ctx, vec![Literal::pos(Term::app(fx.p, vec![Term::var(0)]))]);

        let mut active = ActiveSet::new();
        active.add(&fx.ctx, &[c1]);
        let before = active.snapshot();
        assert_eq!(active.add(&fx.ctx, &[c1, c2, c2]), vec![c2]);
        assert_eq!(active.len(), 2);
        assert_eq!(active.remove(&fx.ctx, &[c2, c2]), vec![c2]);
        assert_eq!(active.snapshot(), before);

        assert_eq!(active.remove(&fx.ctx, &[c1]), vec![c1]);
        assert!(active.is_empty());
        assert!(active.sup_into().is_empty());
        assert!(active.back_demod().is_empty());
        assert!(active.subsumption().is_empty());
    }

    #[test]
    fn test_indexed_literals_matches_eligibility() {
        let mut fx = fixture();
        let pa = Term::app(fx.p, vec![fx.a.clone()]);
        let id = axiom(&mut fx.ctx, vec![Literal::pos(pa)]);
        let (resolution, paramodulation) = indexed_literals(&fx.ctx, id);
        assert!(resolution.contains(0));
        assert!(paramodulation.contains(0));
    }
}
