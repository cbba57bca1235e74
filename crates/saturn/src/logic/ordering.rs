//! Term ordering (Knuth-Bendix) and its multiset extension to literals
//!
//! The saturation core only ever sees the 4-valued `Comparison` through the
//! `TermOrder` trait; KBO is the ordering this crate ships.

use crate::logic::interner::{ConstantId, FunctionId, Interner};
use crate::logic::literal::Literal;
use crate::logic::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result of comparing two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Lt,
    Gt,
    Eq,
    Incomparable,
}

impl Comparison {
    pub fn flip(self) -> Comparison {
        match self {
            Comparison::Lt => Comparison::Gt,
            Comparison::Gt => Comparison::Lt,
            other => other,
        }
    }
}

/// A simplification ordering on terms
pub trait TermOrder: fmt::Debug {
    fn compare(&self, s: &Term, t: &Term) -> Comparison;

    fn greater(&self, s: &Term, t: &Term) -> bool {
        self.compare(s, t) == Comparison::Gt
    }
}

/// Symbol weights and precedences by name, resolved against an interner
/// when the ordering is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KboSettings {
    pub symbol_weights: HashMap<String, u64>,
    pub symbol_precedence: HashMap<String, u64>,
}

/// Configuration for Knuth-Bendix Ordering
#[derive(Debug, Clone, Default)]
pub struct KboConfig {
    pub function_weights: HashMap<FunctionId, u64>,
    pub constant_weights: HashMap<ConstantId, u64>,
    /// Higher value = higher precedence
    pub function_precedence: HashMap<FunctionId, u64>,
    pub constant_precedence: HashMap<ConstantId, u64>,
}

impl KboConfig {
    /// Resolve name-keyed settings. Names not yet interned are ignored.
    pub fn from_settings(interner: &Interner, settings: &KboSettings) -> Self {
        let mut config = KboConfig::default();
        for (name, &weight) in &settings.symbol_weights {
            if let Some(fid) = interner.get_function(name) {
                config.function_weights.insert(fid, weight);
            }
            if let Some(cid) = interner.get_constant(name) {
                config.constant_weights.insert(cid, weight);
            }
        }
        for (name, &prec) in &settings.symbol_precedence {
            if let Some(fid) = interner.get_function(name) {
                config.function_precedence.insert(fid, prec);
            }
            if let Some(cid) = interner.get_constant(name) {
                config.constant_precedence.insert(cid, prec);
            }
        }
        config
    }
}

/// Total order on symbols used when weights tie: precedence first, then
/// functions above constants, then arity, then interned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SymbolKey(u64, u8, u8, u32);

/// Knuth-Bendix Ordering. Variables weigh 1; symbol weights are clamped to
/// at least 1 so that a term strictly outweighs each of its proper subterms.
#[derive(Debug, Clone, Default)]
pub struct Kbo {
    config: KboConfig,
}

impl Kbo {
    pub fn new(config: KboConfig) -> Self {
        Kbo { config }
    }

    pub fn term_weight(&self, term: &Term) -> u64 {
        match term {
            Term::Variable(_) => 1,
            Term::Constant(c) => self.config.constant_weights.get(&c.id).copied().unwrap_or(1).max(1),
            Term::Function(f, args) => {
                let own = self.config.function_weights.get(&f.id).copied().unwrap_or(1).max(1);
                own + args.iter().map(|a| self.term_weight(a)).sum::<u64>()
            }
        }
    }

    fn head(&self, term: &Term) -> Option<SymbolKey> {
        match term {
            Term::Variable(_) => None,
            Term::Constant(c) => {
                let prec = self.config.constant_precedence.get(&c.id).copied().unwrap_or(0);
                Some(SymbolKey(prec, 0, 0, c.id.as_u32()))
            }
            Term::Function(f, _) => {
                let prec = self.config.function_precedence.get(&f.id).copied().unwrap_or(0);
                Some(SymbolKey(prec, 1, f.arity, f.id.as_u32()))
            }
        }
    }

    fn variable_counts(term: &Term, counts: &mut HashMap<Variable, i64>, sign: i64) {
        match term {
            Term::Variable(v) => *counts.entry(*v).or_insert(0) += sign,
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    Self::variable_counts(arg, counts, sign);
                }
            }
        }
    }

    /// s >_kbo t
    fn gt(&self, s: &Term, t: &Term) -> bool {
        if s == t {
            return false;
        }
        match (s, t) {
            (Term::Variable(_), _) => false,
            (_, Term::Variable(x)) => s.occurrences(*x) > 0,
            _ => {
                let mut counts = HashMap::new();
                Self::variable_counts(s, &mut counts, 1);
                Self::variable_counts(t, &mut counts, -1);
                if counts.values().any(|&c| c < 0) {
                    return false;
                }
                let (ws, wt) = (self.term_weight(s), self.term_weight(t));
                if ws != wt {
                    return ws > wt;
                }
                match (self.head(s), self.head(t)) {
                    (Some(hs), Some(ht)) if hs != ht => hs > ht,
                    _ => self.gt_lex(s, t),
                }
            }
        }
    }

    fn gt_lex(&self, s: &Term, t: &Term) -> bool {
        let (Term::Function(_, sargs), Term::Function(_, targs)) = (s, t) else {
            return false;
        };
        match sargs.iter().zip(targs).find(|(a, b)| a != b) {
            Some((a, b)) => self.gt(a, b),
            None => false,
        }
    }
}

impl TermOrder for Kbo {
    fn compare(&self, s: &Term, t: &Term) -> Comparison {
        if s == t {
            Comparison::Eq
        } else if self.gt(s, t) {
            Comparison::Gt
        } else if self.gt(t, s) {
            Comparison::Lt
        } else {
            Comparison::Incomparable
        }
    }
}

/// Multiset extension of a term ordering: M > N iff M != N and every element
/// of N \ M is dominated by some element of M \ N.
pub fn compare_multisets(order: &dyn TermOrder, m: &[&Term], n: &[&Term]) -> Comparison {
    let mut m_rest: Vec<&Term> = m.to_vec();
    let mut n_rest: Vec<&Term> = Vec::with_capacity(n.len());
    for t in n {
        match m_rest.iter().position(|s| s == t) {
            Some(i) => {
                m_rest.swap_remove(i);
            }
            None => n_rest.push(t),
        }
    }
    if m_rest.is_empty() && n_rest.is_empty() {
        return Comparison::Eq;
    }
    let dominates = |big: &[&Term], small: &[&Term]| {
        small
            .iter()
            .all(|y| big.iter().any(|x| order.greater(x, y)))
    };
    if dominates(&m_rest, &n_rest) {
        Comparison::Gt
    } else if dominates(&n_rest, &m_rest) {
        Comparison::Lt
    } else {
        Comparison::Incomparable
    }
}

/// Compare two literals through their ordering multisets
pub fn compare_literals(order: &dyn TermOrder, l1: &Literal, l2: &Literal) -> Comparison {
    compare_multisets(order, &l1.ordering_multiset(), &l2.ordering_multiset())
}
