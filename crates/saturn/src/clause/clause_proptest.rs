//! Property-based tests for clause creation and eligibility.

use super::{ClauseContext, ClauseRole, Provenance};
use crate::logic::{Interner, Kbo, Literal, LiteralSelectionStrategy, ScopedSubstitution, Term};
use crate::test_support::{arb_clause_desc, arb_term_desc, build_clause, build_term};
use proptest::prelude::*;

fn context(strategy: LiteralSelectionStrategy) -> ClauseContext {
    ClauseContext::new(Interner::new(), Box::new(Kbo::default()), strategy.build())
}

fn arb_strategy() -> impl Strategy<Value = LiteralSelectionStrategy> {
    prop_oneof![
        Just(LiteralSelectionStrategy::None),
        Just(LiteralSelectionStrategy::NegMaxWeight),
        Just(LiteralSelectionStrategy::AllNegative),
    ]
}

/// Shift every variable by `offset` so the clause is a renamed variant
fn shift(literals: &[Literal], offset: u32) -> Vec<Literal> {
    literals
        .iter()
        .map(|l| l.map_terms(|t| t.map_variables(&mut |v| crate::logic::Variable::new(v.id + offset))))
        .collect()
}

proptest! {
    #[test]
    fn hashcons_idempotent_up_to_renaming(desc in arb_clause_desc(5), offset in 1u32..50) {
        let mut ctx = context(LiteralSelectionStrategy::None);
        let literals = build_clause(&desc, &mut ctx.interner);
        let first = ctx.create(literals.clone(), Provenance::input(ClauseRole::Axiom), &[], None);
        let again = ctx.create(literals.clone(), Provenance::input(ClauseRole::Axiom), &[], None);
        let variant = ctx.create(shift(&literals, offset), Provenance::derived("copy"), &[], None);
        prop_assert_eq!(first, again);
        prop_assert_eq!(first, variant);
    }

    #[test]
    fn selection_within_bounds(desc in arb_clause_desc(6), strategy in arb_strategy()) {
        let mut ctx = context(strategy);
        let literals = build_clause(&desc, &mut ctx.interner);
        let id = ctx.create(literals, Provenance::input(ClauseRole::Axiom), &[], None);
        let clause = ctx.get(id);
        for i in clause.selected.iter() {
            prop_assert!(i < clause.len());
            prop_assert!(clause.literals[i].is_negative());
        }
    }

    #[test]
    fn paramodulation_within_resolution(
        desc in arb_clause_desc(5),
        binding in arb_term_desc(2, true),
    ) {
        let mut ctx = context(LiteralSelectionStrategy::None);
        let literals = build_clause(&desc, &mut ctx.interner);
        let id = ctx.create(literals, Provenance::input(ClauseRole::Axiom), &[], None);
        prop_assert!(ctx.get(id).selected.is_empty());

        let target = build_term(&binding, &mut ctx.interner);
        let mut substitutions = vec![ScopedSubstitution::new()];
        if let Ok(sigma) = crate::logic::unify_scoped(&Term::var(0), 0, &target, 1) {
            substitutions.push(sigma);
        }
        for sigma in &substitutions {
            let res = ctx.eligible_for_resolution(id, sigma, 0);
            let para = ctx.eligible_for_paramodulation(id, sigma, 0);
            prop_assert!(para.is_subset(&res));
            prop_assert!(!res.is_empty());
        }
    }
}
