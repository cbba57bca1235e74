//! Shared strategies for property-based tests

use crate::logic::{Interner, Literal, Term};
use proptest::prelude::*;

/// Term description before interning
#[derive(Debug, Clone)]
pub enum TermDesc {
    Var(u8),
    Const(u8),
    Func(u8, Vec<TermDesc>),
}

pub fn arb_term_desc(max_depth: u32, with_vars: bool) -> BoxedStrategy<TermDesc> {
    let leaf = if with_vars {
        prop_oneof![
            (0..3u8).prop_map(TermDesc::Var),
            (0..3u8).prop_map(TermDesc::Const),
        ]
        .boxed()
    } else {
        (0..3u8).prop_map(TermDesc::Const).boxed()
    };
    if max_depth == 0 {
        leaf
    } else {
        prop_oneof![
            3 => leaf,
            2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1, with_vars), 1..=2))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

pub fn build_term(desc: &TermDesc, interner: &mut Interner) -> Term {
    match desc {
        TermDesc::Var(i) => Term::var(*i as u32),
        TermDesc::Const(i) => Term::constant(interner.intern_constant(&format!("c{}", i))),
        TermDesc::Func(f, args) => {
            // arity is part of the symbol name so one name never has two arities
            let id = interner.intern_function(&format!("f{}_{}", f, args.len()));
            let built = args.iter().map(|a| build_term(a, interner)).collect();
            Term::app(id, built)
        }
    }
}

/// Literal description: (is_equation, positive, lhs, rhs)
#[derive(Debug, Clone)]
pub struct LiteralDesc {
    pub equation: bool,
    pub positive: bool,
    pub lhs: TermDesc,
    pub rhs: TermDesc,
}

pub fn arb_literal_desc(max_depth: u32) -> impl Strategy<Value = LiteralDesc> {
    (
        any::<bool>(),
        any::<bool>(),
        arb_term_desc(max_depth, true),
        arb_term_desc(max_depth, true),
    )
        .prop_map(|(equation, positive, lhs, rhs)| LiteralDesc {
            equation,
            positive,
            lhs,
            rhs,
        })
}

pub fn arb_clause_desc(max_len: usize) -> impl Strategy<Value = Vec<LiteralDesc>> {
    proptest::collection::vec(arb_literal_desc(2), 1..=max_len)
}

pub fn build_literal(desc: &LiteralDesc, interner: &mut Interner) -> Literal {
    let lhs = build_term(&desc.lhs, interner);
    if desc.equation {
        let rhs = build_term(&desc.rhs, interner);
        Literal::Equation {
            lhs,
            rhs,
            positive: desc.positive,
        }
    } else {
        // wrap in a predicate so the atom is never a bare variable
        let p = interner.intern_function("p");
        Literal::Prop {
            atom: Term::app(p, vec![lhs]),
            positive: desc.positive,
        }
    }
}

pub fn build_clause(desc: &[LiteralDesc], interner: &mut Interner) -> Vec<Literal> {
    desc.iter().map(|d| build_literal(d, interner)).collect()
}
