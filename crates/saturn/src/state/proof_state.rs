//! The proof state: clause context plus the three clause sets.
//!
//! An outside given-clause loop drives it:
//!
//! 1. `next_given` picks a clause from the passive set
//! 2. the caller runs its inference rules against the active set
//! 3. `activate` indexes the given clause; conclusions go back through
//!    `passive.add`, and simplified-away clauses through `retract`
//!
//! When the passive set runs dry without the empty clause, the verdict
//! depends on whether any clause had to be dropped along the way.

use super::active::ActiveSet;
use super::passive::{CleanPolicy, PassiveSet};
use super::simpl::SimplSet;
use super::stats::StateStats;
use crate::clause::{ClauseContext, ClauseId};
use crate::config::SaturationConfig;
use crate::error::Result;
use crate::logic::Interner;
use serde::Serialize;
use tracing::debug;

/// A source of initial clauses
pub trait Expert {
    fn name(&self) -> &str;

    /// Create this expert's clauses in `ctx`
    fn initial_clauses(&mut self, ctx: &mut ClauseContext) -> Vec<ClauseId>;
}

/// Outcome when the passive set is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Satisfiable,
    /// Some clause was replaced by the trivial clause, so saturation does
    /// not prove satisfiability
    Unknown,
}

pub struct ProofState {
    pub ctx: ClauseContext,
    pub active: ActiveSet,
    pub passive: PassiveSet,
    pub simpl: SimplSet,
    experts: Vec<Box<dyn Expert>>,
    clean_policy: CleanPolicy,
    given: usize,
}

impl ProofState {
    /// Build the clause context and passive queues from `config`. KBO
    /// symbol settings resolve against the names already in `interner`.
    pub fn new(interner: Interner, config: &SaturationConfig) -> Result<Self> {
        let passive = PassiveSet::new(config.build_queues()?)?;
        let ctx = config.build_context(interner);
        debug!(
            selection = ctx.selector().name(),
            queues = passive.queues().len(),
            "created proof state"
        );
        Ok(ProofState {
            ctx,
            active: ActiveSet::new(),
            passive,
            simpl: SimplSet::new(),
            experts: Vec::new(),
            clean_policy: config.clean_policy,
            given: 0,
        })
    }

    /// Seed the passive set with the expert's clauses and keep the expert.
    /// Returns the clause ids it produced.
    pub fn add_expert(&mut self, mut expert: Box<dyn Expert>) -> Vec<ClauseId> {
        let ids = expert.initial_clauses(&mut self.ctx);
        let fresh = self.passive.add(&self.ctx, &ids);
        debug!(expert = expert.name(), clauses = ids.len(), fresh, "seeded passive set");
        self.experts.push(expert);
        ids
    }

    pub fn experts(&self) -> impl Iterator<Item = &str> {
        self.experts.iter().map(|e| e.name())
    }

    /// Next given clause, cleaning the passive queues when the policy says so
    pub fn next_given(&mut self) -> Option<ClauseId> {
        let id = self.passive.next()?;
        self.given += 1;
        if let CleanPolicy::Periodic { interval } = self.clean_policy {
            if interval > 0 && self.given % interval == 0 {
                self.passive.clean();
            }
        }
        Some(id)
    }

    /// Move clauses into the active and simplification sets
    pub fn activate(&mut self, ids: &[ClauseId]) {
        self.active.add(&self.ctx, ids);
        self.simpl.add(&self.ctx, ids);
    }

    /// Take clauses out of every set
    pub fn retract(&mut self, ids: &[ClauseId]) {
        self.active.remove(&self.ctx, ids);
        self.simpl.remove(&self.ctx, ids);
        for &id in ids {
            self.passive.remove(id);
        }
    }

    pub fn verdict_on_exhaustion(&self) -> Verdict {
        if self.ctx.is_incomplete() {
            Verdict::Unknown
        } else {
            Verdict::Satisfiable
        }
    }

    pub fn given_count(&self) -> usize {
        self.given
    }

    pub fn stats(&self) -> StateStats {
        StateStats {
            clauses: self.ctx.stats(),
            active: self.active.stats(),
            passive: self.passive.stats(),
            simpl_size: self.simpl.len(),
            given: self.given,
            incomplete: self.ctx.is_incomplete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ClauseRole, LiteralSet, Provenance};
    use crate::logic::{Comparison, KboSettings, Literal, LiteralSelectionStrategy, Term};

    struct Units {
        names: Vec<&'static str>,
    }

    impl Expert for Units {
        fn name(&self) -> &str {
            "units"
        }

        fn initial_clauses(&mut self, ctx: &mut ClauseContext) -> Vec<ClauseId> {
            let p = ctx.interner.intern_function("p");
            self.names
                .iter()
                .map(|name| {
                    let c = Term::constant(ctx.interner.intern_constant(name));
                    ctx.create(vec![Literal::pos(Term::app(p, vec![c]))], Provenance::input(ClauseRole::Axiom), &[], None)
                })
                .collect()
        }
    }

    fn state(config: &SaturationConfig) -> ProofState {
        ProofState::new(Interner::new(), config).unwrap()
    }

    #[test]
    fn test_context_follows_config() {
        let config = SaturationConfig {
            literal_selection: LiteralSelectionStrategy::NegMaxWeight,
            ..Default::default()
        };
        let mut ps = state(&config);
        assert_eq!(ps.ctx.selector().name(), "neg_max_weight");

        let p = ps.ctx.interner.intern_function("p");
        let q = ps.ctx.interner.intern_function("q");
        let x = Term::var(0);
        let id = ps.ctx.create(
            vec![Literal::neg(Term::app(p, vec![x.clone()])), Literal::pos(Term::app(q, vec![x]))],
            Provenance::input(ClauseRole::Axiom),
            &[],
            None,
        );
        assert_eq!(ps.ctx.get(id).selected, LiteralSet::from_indices([0]));
    }

    #[test]
    fn test_kbo_settings_reach_the_ordering() {
        let heavy = |name: &str| SaturationConfig {
            kbo: KboSettings {
                symbol_weights: [(name.to_string(), 5)].into_iter().collect(),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut interner = Interner::new();
        let a = Term::constant(interner.intern_constant("a"));
        let b = Term::constant(interner.intern_constant("b"));

        let ps = ProofState::new(interner.clone(), &heavy("a")).unwrap();
        assert_eq!(ps.ctx.ordering().compare(&a, &b), Comparison::Gt);
        let ps = ProofState::new(interner, &heavy("b")).unwrap();
        assert_eq!(ps.ctx.ordering().compare(&a, &b), Comparison::Lt);
    }

    #[test]
    fn test_zero_coefficient_queue_rejected() {
        let config = SaturationConfig::from_json(r#"{"queues": [{"name": "fifo", "coefficient": 0}]}"#).unwrap();
        assert!(matches!(
            ProofState::new(Interner::new(), &config),
            Err(crate::error::SaturnError::ZeroCoefficient(_))
        ));
    }

    #[test]
    fn test_expert_seeds_passive() {
        let mut ps = state(&SaturationConfig::default());
        let ids = ps.add_expert(Box::new(Units { names: vec!["a", "b", "c"] }));
        assert_eq!(ids.len(), 3);
        assert_eq!(ps.passive.len(), 3);
        assert_eq!(ps.experts().collect::<Vec<_>>(), vec!["units"]);
    }

    #[test]
    fn test_activate_and_retract() {
        let mut ps = state(&SaturationConfig::default());
        let f = ps.ctx.interner.intern_function("f");
        let a = Term::constant(ps.ctx.interner.intern_constant("a"));
        let eq = ps.ctx.create(
            vec![Literal::equal(Term::app(f, vec![a.clone()]), a)],
            Provenance::input(ClauseRole::Axiom),
            &[],
            None,
        );
        ps.passive.add(&ps.ctx, &[eq]);
        let given = ps.next_given().unwrap();
        ps.activate(&[given]);
        assert!(ps.active.contains(eq));
        assert_eq!(ps.simpl.len(), 1);

        ps.retract(&[eq]);
        assert!(ps.active.is_empty());
        assert!(ps.simpl.is_empty());
        assert_eq!(ps.stats().active.removed, 1);
    }

    #[test]
    fn test_periodic_clean() {
        let config = SaturationConfig {
            clean_policy: CleanPolicy::Periodic { interval: 2 },
            ..Default::default()
        };
        let mut ps = state(&config);
        ps.add_expert(Box::new(Units { names: vec!["a", "b", "c", "d"] }));
        ps.next_given();
        assert_eq!(ps.passive.stats().cleaned, 0);
        ps.next_given();
        // each of the two given clauses was still in the other queue
        assert_eq!(ps.passive.stats().cleaned, 2);
        assert_eq!(ps.given_count(), 2);
    }

    #[test]
    fn test_manual_clean_never_runs() {
        let config = SaturationConfig {
            clean_policy: CleanPolicy::Manual,
            ..Default::default()
        };
        let mut ps = state(&config);
        ps.add_expert(Box::new(Units { names: vec!["a", "b"] }));
        while ps.next_given().is_some() {}
        assert_eq!(ps.passive.stats().cleaned, 0);
    }

    #[test]
    fn test_verdict_follows_incompleteness() {
        let mut ps = state(&SaturationConfig::default());
        assert_eq!(ps.verdict_on_exhaustion(), Verdict::Satisfiable);
        let p = ps.ctx.interner.intern_function("p");
        let literals: Vec<_> = (0..=LiteralSet::CAPACITY as u32)
            .map(|i| Literal::pos(Term::app(p, vec![Term::var(i)])))
            .collect();
        let id = ps.ctx.create(literals, Provenance::derived("test"), &[], None);
        assert_eq!(id, ps.ctx.trivial());
        assert_eq!(ps.verdict_on_exhaustion(), Verdict::Unknown);
        assert!(ps.stats().incomplete);
    }
}
