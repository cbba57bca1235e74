//! Ordering and selection constraints on which literals may take part in
//! an inference, and instantiation of whole clauses

use super::context::ClauseContext;
use super::literal_set::LiteralSet;
use super::record::{Clause, ClauseId, Provenance};
use crate::logic::{compare_literals, Comparison, Literal, Renaming, ScopedSubstitution};
use std::borrow::Cow;

impl ClauseContext {
    /// Literals of `clause` instantiated by `subst` at `scope`, sharing one
    /// renaming across the clause
    pub fn instantiate_literals<'a>(
        &self,
        clause: &'a Clause,
        subst: &ScopedSubstitution,
        scope: u8,
    ) -> Cow<'a, [Literal]> {
        if subst.is_empty() {
            return Cow::Borrowed(&clause.literals[..]);
        }
        let mut renaming = Renaming::new();
        Cow::Owned(
            clause
                .literals
                .iter()
                .map(|lit| lit.instantiate(scope, subst, &mut renaming))
                .collect(),
        )
    }

    /// Literals of `id` that may be resolved upon under `subst`.
    ///
    /// With a selection the candidates are the selected literals, otherwise
    /// all of them. A candidate strictly smaller than another candidate is
    /// dropped; with a selection only literals of the same sign are compared.
    pub fn eligible_for_resolution(
        &self,
        id: ClauseId,
        subst: &ScopedSubstitution,
        scope: u8,
    ) -> LiteralSet {
        let clause = self.get(id);
        let literals = self.instantiate_literals(clause, subst, scope);
        let has_selection = !clause.selected.is_empty();
        let candidates = if has_selection {
            clause.selected
        } else {
            LiteralSet::all(clause.len())
        };

        let mut eligible = candidates;
        for i in candidates.iter() {
            for j in candidates.iter() {
                if i == j {
                    continue;
                }
                if has_selection && literals[i].is_positive() != literals[j].is_positive() {
                    continue;
                }
                if compare_literals(self.ordering(), &literals[i], &literals[j]) == Comparison::Lt {
                    eligible.remove(i);
                    break;
                }
            }
        }
        eligible
    }

    /// Positive maximal literals of `id` under `subst`; empty when the
    /// clause has a selection
    pub fn eligible_for_paramodulation(
        &self,
        id: ClauseId,
        subst: &ScopedSubstitution,
        scope: u8,
    ) -> LiteralSet {
        let clause = self.get(id);
        if !clause.selected.is_empty() {
            return LiteralSet::empty();
        }
        self.eligible_for_resolution(id, subst, scope)
            .intersection(clause.positive_literals())
    }

    pub fn is_maximal_literal(
        &self,
        id: ClauseId,
        subst: &ScopedSubstitution,
        scope: u8,
        index: usize,
    ) -> bool {
        self.eligible_for_resolution(id, subst, scope).contains(index)
    }

    /// Instance of `id` under `subst`. The result has `id` as its parent and
    /// inherits its descendants.
    pub fn apply_substitution(
        &mut self,
        id: ClauseId,
        subst: &ScopedSubstitution,
        scope: u8,
    ) -> ClauseId {
        let clause = self.get(id);
        let mut renaming = Renaming::new();
        let literals: Vec<Literal> = clause
            .literals
            .iter()
            .map(|lit| lit.instantiate(scope, subst, &mut renaming))
            .collect();
        let provenance = Provenance {
            rule: "instantiate".to_string(),
            ..clause.provenance.clone()
        };
        let inherited = clause.descendants.clone();

        let instance = self.create(literals, provenance, &[id], None);
        if instance != id {
            self.extend_descendants(instance, &inherited);
        }
        instance
    }
}
