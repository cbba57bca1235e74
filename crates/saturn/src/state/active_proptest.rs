//! Property-based tests: incremental active-set indexing agrees with a
//! from-scratch rebuild, and passive selection never repeats or resurrects.

use super::{ActiveSet, PassiveSet};
use crate::clause::{ClauseContext, ClauseId, ClauseRole, Provenance};
use crate::logic::{Interner, Kbo, LiteralSelectionStrategy};
use crate::queue::Profile;
use crate::test_support::{arb_clause_desc, build_clause, LiteralDesc};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(Vec<usize>),
    Remove(Vec<usize>),
}

fn arb_ops(pool: usize) -> impl Strategy<Value = Vec<Op>> {
    let picks = proptest::collection::vec(0..pool, 1..4);
    proptest::collection::vec(
        prop_oneof![
            picks.clone().prop_map(Op::Add),
            picks.prop_map(Op::Remove),
        ],
        1..20,
    )
}

fn arb_pool() -> impl Strategy<Value = Vec<Vec<LiteralDesc>>> {
    proptest::collection::vec(arb_clause_desc(3), 6)
}

fn populate(strategy: LiteralSelectionStrategy, pool: &[Vec<LiteralDesc>]) -> (ClauseContext, Vec<ClauseId>) {
    let mut ctx = ClauseContext::new(Interner::new(), Box::new(Kbo::default()), strategy.build());
    let ids = pool
        .iter()
        .map(|desc| {
            let literals = build_clause(desc, &mut ctx.interner);
            ctx.create(literals, Provenance::input(ClauseRole::Axiom), &[], None)
        })
        .collect();
    (ctx, ids)
}

fn arb_strategy() -> impl Strategy<Value = LiteralSelectionStrategy> {
    prop_oneof![
        Just(LiteralSelectionStrategy::None),
        Just(LiteralSelectionStrategy::NegMaxWeight),
    ]
}

proptest! {
    #[test]
    fn active_indices_match_rebuild(pool in arb_pool(), ops in arb_ops(6), strategy in arb_strategy()) {
        let (ctx, ids) = populate(strategy, &pool);
        let mut active = ActiveSet::new();
        for op in &ops {
            match op {
                Op::Add(picks) => {
                    let batch: Vec<_> = picks.iter().map(|&i| ids[i]).collect();
                    active.add(&ctx, &batch);
                }
                Op::Remove(picks) => {
                    let batch: Vec<_> = picks.iter().map(|&i| ids[i]).collect();
                    active.remove(&ctx, &batch);
                }
            }
            prop_assert_eq!(active.snapshot(), active.rebuilt(&ctx).snapshot());
        }
    }

    #[test]
    fn passive_gives_each_live_clause_once(pool in arb_pool(), removed in proptest::collection::vec(0..6usize, 0..4)) {
        let (ctx, ids) = populate(LiteralSelectionStrategy::None, &pool);
        let mut passive = PassiveSet::new(Profile::Explore.queues()).unwrap();
        passive.add(&ctx, &ids);
        let gone: HashSet<ClauseId> = removed.iter().map(|&i| ids[i]).collect();
        for &id in &gone {
            passive.remove(id);
        }

        let mut given = HashSet::new();
        while let Some(id) = passive.next() {
            prop_assert!(!gone.contains(&id));
            prop_assert!(given.insert(id));
        }
        let live: HashSet<ClauseId> = ids.iter().copied().filter(|id| !gone.contains(id)).collect();
        // fifo accepts everything, so nothing live is left behind
        prop_assert_eq!(given, live);
        prop_assert!(passive.is_empty());
    }
}
