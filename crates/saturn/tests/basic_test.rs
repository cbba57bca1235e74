//! Integration tests driving the proof state with a minimal resolution loop

use saturn::clause::ClauseContext;
use saturn::logic::{unify_scoped, Renaming, Term};
use saturn::{
    ClauseId, ClauseRole, Expert, Interner, Literal, LiteralSelectionStrategy, ProofState, Provenance,
    SaturationConfig, Verdict,
};

/// Binary resolution between the given clause (scope 0) and an active
/// partner (scope 1), restricted to eligible literals on both sides.
fn resolve(ctx: &mut ClauseContext, given: ClauseId, partner: ClauseId) -> Vec<ClauseId> {
    let empty = Default::default();
    let g_eligible = ctx.eligible_for_resolution(given, &empty, 0);
    let p_eligible = ctx.eligible_for_resolution(partner, &empty, 1);
    let g_lits = ctx.get(given).literals.clone();
    let p_lits = ctx.get(partner).literals.clone();

    let mut conclusions = Vec::new();
    for i in g_eligible.iter() {
        for j in p_eligible.iter() {
            let (
                Literal::Prop { atom: a1, positive: s1 },
                Literal::Prop { atom: a2, positive: s2 },
            ) = (&g_lits[i], &p_lits[j])
            else {
                continue;
            };
            if s1 == s2 {
                continue;
            }
            let Ok(subst) = unify_scoped(a1, 0, a2, 1) else {
                continue;
            };
            if !ctx.is_maximal_literal(given, &subst, 0, i)
                || !ctx.is_maximal_literal(partner, &subst, 1, j)
            {
                continue;
            }
            let mut renaming = Renaming::new();
            let mut literals = Vec::new();
            for (k, lit) in g_lits.iter().enumerate() {
                if k != i {
                    literals.push(lit.instantiate(0, &subst, &mut renaming));
                }
            }
            for (k, lit) in p_lits.iter().enumerate() {
                if k != j {
                    literals.push(lit.instantiate(1, &subst, &mut renaming));
                }
            }
            conclusions.push(ctx.create(literals, Provenance::derived("resolution"), &[given, partner], None));
        }
    }
    conclusions
}

struct Problem;

impl Expert for Problem {
    fn name(&self) -> &str {
        "problem"
    }

    fn initial_clauses(&mut self, ctx: &mut ClauseContext) -> Vec<ClauseId> {
        let p = ctx.interner.intern_function("p");
        let q = ctx.interner.intern_function("q");
        let a = Term::constant(ctx.interner.intern_constant("a"));
        let x = Term::var(0);
        vec![
            ctx.create(vec![Literal::pos(Term::app(p, vec![a.clone()]))], Provenance::input(ClauseRole::Axiom), &[], None),
            ctx.create(
                vec![Literal::neg(Term::app(p, vec![x.clone()])), Literal::pos(Term::app(q, vec![x]))],
                Provenance::input(ClauseRole::Axiom),
                &[],
                None,
            ),
            ctx.create(vec![Literal::neg(Term::app(q, vec![a]))], Provenance::input(ClauseRole::NegatedConjecture), &[], None),
        ]
    }
}

/// Run the loop until the empty clause appears. Returns the empty clause and
/// the active set at the moment it was derived.
fn saturate(ps: &mut ProofState) -> Option<(ClauseId, Vec<ClauseId>)> {
    while let Some(given) = ps.next_given() {
        ps.activate(&[given]);
        let partners: Vec<_> = ps.active.clauses().collect();
        for partner in partners {
            for conclusion in resolve(&mut ps.ctx, given, partner) {
                if ps.ctx.get(conclusion).is_empty() {
                    return Some((conclusion, ps.active.clauses().collect()));
                }
                if !ps.active.contains(conclusion) {
                    ps.passive.add(&ps.ctx, &[conclusion]);
                }
            }
        }
    }
    None
}

#[test]
fn test_simple_resolution() {
    let config = SaturationConfig {
        literal_selection: LiteralSelectionStrategy::NegMaxWeight,
        ..Default::default()
    };
    let mut ps = ProofState::new(Interner::new(), &config).unwrap();
    assert_eq!(ps.ctx.selector().name(), "neg_max_weight");
    let originals = ps.add_expert(Box::new(Problem));

    let (empty, mut active) = saturate(&mut ps).expect("expected a refutation");

    let q = ps.ctx.interner.get_function("q").unwrap();
    let a = Term::constant(ps.ctx.interner.get_constant("a").unwrap());
    let qa = ps.ctx.create(vec![Literal::pos(Term::app(q, vec![a]))], Provenance::derived("lookup"), &[], None);
    assert_eq!(ps.ctx.get(qa).provenance.rule, "resolution");

    let mut expected = originals.clone();
    expected.push(qa);
    expected.sort();
    active.sort();
    assert_eq!(active, expected);

    // the refutation descends from the negated conjecture
    assert_eq!(ps.ctx.get(empty).distance_to_goal, Some(1));
    assert!(ps.ctx.descendants(originals[2]).contains(&empty));
    assert!(ps.ctx.descendants(originals[0]).contains(&qa));
}

#[test]
fn test_satisfiable_set_saturates() {
    struct Sat;
    impl Expert for Sat {
        fn name(&self) -> &str {
            "sat"
        }
        fn initial_clauses(&mut self, ctx: &mut ClauseContext) -> Vec<ClauseId> {
            let p = ctx.interner.intern_function("p");
            let q = ctx.interner.intern_function("q");
            let a = Term::constant(ctx.interner.intern_constant("a"));
            let b = Term::constant(ctx.interner.intern_constant("b"));
            vec![
                ctx.create(vec![Literal::pos(Term::app(p, vec![a]))], Provenance::input(ClauseRole::Axiom), &[], None),
                ctx.create(vec![Literal::neg(Term::app(q, vec![b]))], Provenance::input(ClauseRole::Axiom), &[], None),
            ]
        }
    }

    let mut ps = ProofState::new(Interner::new(), &SaturationConfig::default()).unwrap();
    ps.add_expert(Box::new(Sat));
    assert!(saturate(&mut ps).is_none());
    assert_eq!(ps.active.len(), 2);
    assert_eq!(ps.verdict_on_exhaustion(), Verdict::Satisfiable);

    let stats = ps.stats();
    assert_eq!(stats.given, 2);
    let json = stats.to_json().unwrap();
    assert!(json.contains("\"given\":2"));
}

#[test]
fn test_every_profile_finds_the_refutation() {
    for profile in saturn::Profile::ALL {
        let config = SaturationConfig {
            profile,
            ..Default::default()
        };
        let mut ps = ProofState::new(Interner::new(), &config).unwrap();
        ps.add_expert(Box::new(Problem));
        assert!(saturate(&mut ps).is_some(), "no refutation under {}", profile.name());
    }
}
