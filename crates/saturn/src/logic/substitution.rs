//! Scoped substitutions and unification
//!
//! Variables from different premises are kept apart by pairing each variable
//! with a scope tag instead of renaming premises up front. Turning a scoped
//! term back into a plain term goes through a `Renaming`, which must be
//! shared across every literal of the clause being built so that one scoped
//! variable maps to one clause variable.

use crate::logic::interner::{ConstantId, FunctionId};
use crate::logic::term::{Constant, FunctionSymbol, Term, Variable};
use std::collections::HashMap;
use thiserror::Error;

/// A variable tagged with its premise scope
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScopedVar {
    pub scope: u8,
    pub var: Variable,
}

/// A term with scoped variables
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopedTerm {
    Variable(ScopedVar),
    Constant(ConstantId),
    Function(FunctionId, Vec<ScopedTerm>),
}

/// Substitution mapping scoped variables to scoped terms
pub type ScopedSubstitution = HashMap<ScopedVar, ScopedTerm>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnificationError {
    #[error("occurs check failed")]
    OccursCheck,
    #[error("symbol clash")]
    Clash,
}

/// Lift a concrete Term into a ScopedTerm at the given scope
pub fn lift(term: &Term, scope: u8) -> ScopedTerm {
    match term {
        Term::Variable(v) => ScopedTerm::Variable(ScopedVar { scope, var: *v }),
        Term::Constant(c) => ScopedTerm::Constant(c.id),
        Term::Function(f, args) => {
            ScopedTerm::Function(f.id, args.iter().map(|a| lift(a, scope)).collect())
        }
    }
}

/// Apply a scoped substitution to a ScopedTerm (chase bindings to fixpoint)
pub fn apply_scoped_term(term: &ScopedTerm, subst: &ScopedSubstitution) -> ScopedTerm {
    match term {
        ScopedTerm::Variable(sv) => match subst.get(sv) {
            Some(bound) => apply_scoped_term(bound, subst),
            None => term.clone(),
        },
        ScopedTerm::Constant(_) => term.clone(),
        ScopedTerm::Function(f, args) => {
            ScopedTerm::Function(*f, args.iter().map(|a| apply_scoped_term(a, subst)).collect())
        }
    }
}

fn occurs(var: &ScopedVar, term: &ScopedTerm, subst: &ScopedSubstitution) -> bool {
    match term {
        ScopedTerm::Variable(sv) => {
            sv == var || subst.get(sv).is_some_and(|bound| occurs(var, bound, subst))
        }
        ScopedTerm::Constant(_) => false,
        ScopedTerm::Function(_, args) => args.iter().any(|a| occurs(var, a, subst)),
    }
}

/// Unify two concrete terms living in (possibly) different scopes
pub fn unify_scoped(
    t1: &Term,
    scope1: u8,
    t2: &Term,
    scope2: u8,
) -> Result<ScopedSubstitution, UnificationError> {
    let mut subst = ScopedSubstitution::new();
    unify_scoped_terms(&lift(t1, scope1), &lift(t2, scope2), &mut subst)?;
    Ok(subst)
}

/// Robinson unification on ScopedTerms, extending `subst`
pub fn unify_scoped_terms(
    t1: &ScopedTerm,
    t2: &ScopedTerm,
    subst: &mut ScopedSubstitution,
) -> Result<(), UnificationError> {
    let t1 = apply_scoped_term(t1, subst);
    let t2 = apply_scoped_term(t2, subst);

    match (&t1, &t2) {
        _ if t1 == t2 => Ok(()),
        (ScopedTerm::Variable(v), t) | (t, ScopedTerm::Variable(v)) => {
            if occurs(v, t, subst) {
                Err(UnificationError::OccursCheck)
            } else {
                subst.insert(*v, t.clone());
                Ok(())
            }
        }
        (ScopedTerm::Function(f1, args1), ScopedTerm::Function(f2, args2)) => {
            if f1 != f2 || args1.len() != args2.len() {
                return Err(UnificationError::Clash);
            }
            for (a1, a2) in args1.iter().zip(args2) {
                unify_scoped_terms(a1, a2, subst)?;
            }
            Ok(())
        }
        _ => Err(UnificationError::Clash),
    }
}

/// Maps surviving scoped variables to fresh clause variables.
///
/// Numbers are handed out in first-flatten order. They need not be canonical:
/// clause creation renumbers anyway.
#[derive(Debug, Default, Clone)]
pub struct Renaming {
    map: HashMap<ScopedVar, Variable>,
    next: u32,
}

impl Renaming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(&mut self, sv: ScopedVar) -> Variable {
        if let Some(&v) = self.map.get(&sv) {
            return v;
        }
        let v = Variable::new(self.next);
        self.next += 1;
        self.map.insert(sv, v);
        v
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Convert a ScopedTerm back to a concrete Term
pub fn flatten(term: &ScopedTerm, renaming: &mut Renaming) -> Term {
    match term {
        ScopedTerm::Variable(sv) => Term::Variable(renaming.rename(*sv)),
        ScopedTerm::Constant(cid) => Term::Constant(Constant::new(*cid)),
        ScopedTerm::Function(fid, args) => Term::Function(
            FunctionSymbol::new(*fid, args.len() as u8),
            args.iter().map(|a| flatten(a, renaming)).collect(),
        ),
    }
}

/// Instantiate `term` (living in `scope`) under `subst` and flatten it
pub fn instantiate(
    term: &Term,
    scope: u8,
    subst: &ScopedSubstitution,
    renaming: &mut Renaming,
) -> Term {
    flatten(&apply_scoped_term(&lift(term, scope), subst), renaming)
}
