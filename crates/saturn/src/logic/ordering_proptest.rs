//! Property-based tests for KBO and the literal multiset extension.

use super::ordering::{compare_literals, Comparison, Kbo, TermOrder};
use crate::logic::{Interner, Term};
use crate::test_support::{arb_literal_desc, arb_term_desc, build_literal, build_term};
use proptest::prelude::*;

fn arb_triple(with_vars: bool) -> impl Strategy<Value = (Term, Term, Term)> {
    (
        arb_term_desc(3, with_vars),
        arb_term_desc(3, with_vars),
        arb_term_desc(3, with_vars),
    )
        .prop_map(|(d1, d2, d3)| {
            let mut interner = Interner::new();
            (
                build_term(&d1, &mut interner),
                build_term(&d2, &mut interner),
                build_term(&d3, &mut interner),
            )
        })
}

proptest! {
    /// Transitivity: if a > b and b > c, then a > c
    #[test]
    fn kbo_transitivity((t1, t2, t3) in arb_triple(true)) {
        let kbo = Kbo::default();
        if kbo.greater(&t1, &t2) && kbo.greater(&t2, &t3) {
            prop_assert!(kbo.greater(&t1, &t3));
        }
    }

    /// compare(s, t) is the mirror image of compare(t, s)
    #[test]
    fn kbo_antisymmetry((t1, t2, _t3) in arb_triple(true)) {
        let kbo = Kbo::default();
        prop_assert_eq!(kbo.compare(&t1, &t2), kbo.compare(&t2, &t1).flip());
    }

    /// KBO is total on ground terms
    #[test]
    fn kbo_total_on_ground((t1, t2, _t3) in arb_triple(false)) {
        let kbo = Kbo::default();
        prop_assert_ne!(kbo.compare(&t1, &t2), Comparison::Incomparable);
    }

    #[test]
    fn literal_comparison_mirrors(d1 in arb_literal_desc(2), d2 in arb_literal_desc(2)) {
        let mut interner = Interner::new();
        let l1 = build_literal(&d1, &mut interner);
        let l2 = build_literal(&d2, &mut interner);
        let kbo = Kbo::default();
        prop_assert_eq!(compare_literals(&kbo, &l1, &l2), compare_literals(&kbo, &l2, &l1).flip());
        prop_assert_eq!(compare_literals(&kbo, &l1, &l1), Comparison::Eq);
    }
}
