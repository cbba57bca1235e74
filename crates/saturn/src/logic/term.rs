//! Terms in first-order logic

use crate::logic::interner::{ConstantId, FunctionId, Interner};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Argument path from the root of a term: `[arg_idx, arg_idx, ...]`.
/// Empty for the root itself.
pub type TermPath = Vec<usize>;

/// A numbered variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub id: u32,
}

impl Variable {
    pub fn new(id: u32) -> Self {
        Variable { id }
    }
}

/// A constant symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub id: ConstantId,
}

impl Constant {
    pub fn new(id: ConstantId) -> Self {
        Constant { id }
    }
}

/// A function (or predicate) symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub id: FunctionId,
    pub arity: u8,
}

impl FunctionSymbol {
    pub fn new(id: FunctionId, arity: u8) -> Self {
        FunctionSymbol { id, arity }
    }
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    pub fn var(id: u32) -> Term {
        Term::Variable(Variable::new(id))
    }

    pub fn constant(id: ConstantId) -> Term {
        Term::Constant(Constant::new(id))
    }

    /// Apply `id` to `args`; arity is taken from the argument count.
    pub fn app(id: FunctionId, args: Vec<Term>) -> Term {
        Term::Function(FunctionSymbol::new(id, args.len() as u8), args)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Distinct variables in first-occurrence (left-to-right, preorder) order
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    /// Append variables not already in `vars`, preserving first-occurrence order
    pub fn collect_variables(&self, vars: &mut Vec<Variable>) {
        match self {
            Term::Variable(v) => {
                if !vars.contains(v) {
                    vars.push(*v);
                }
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Symbol count: every variable, constant and function symbol counts 1
    pub fn weight(&self) -> u64 {
        match self {
            Term::Variable(_) | Term::Constant(_) => 1,
            Term::Function(_, args) => 1 + args.iter().map(Term::weight).sum::<u64>(),
        }
    }

    /// Number of occurrences of `var` in this term
    pub fn occurrences(&self, var: Variable) -> usize {
        match self {
            Term::Variable(v) => usize::from(*v == var),
            Term::Constant(_) => 0,
            Term::Function(_, args) => args.iter().map(|a| a.occurrences(var)).sum(),
        }
    }

    /// All subterms in preorder, each with its path from the root
    pub fn subterms_with_paths(&self) -> Vec<(TermPath, &Term)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.walk(&mut path, &mut out);
        out
    }

    fn walk<'a>(&'a self, path: &mut TermPath, out: &mut Vec<(TermPath, &'a Term)>) {
        out.push((path.clone(), self));
        if let Term::Function(_, args) = self {
            for (i, arg) in args.iter().enumerate() {
                path.push(i);
                arg.walk(path, out);
                path.pop();
            }
        }
    }

    /// The subterm at `path`, if the path exists
    pub fn at(&self, path: &[usize]) -> Option<&Term> {
        let mut current = self;
        for &i in path {
            match current {
                Term::Function(_, args) => current = args.get(i)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Rename variables through `f`
    pub fn map_variables(&self, f: &mut impl FnMut(Variable) -> Variable) -> Term {
        match self {
            Term::Variable(v) => Term::Variable(f(*v)),
            Term::Constant(_) => self.clone(),
            Term::Function(func, args) => {
                Term::Function(*func, args.iter().map(|a| a.map_variables(f)).collect())
            }
        }
    }

    /// Format this term with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

/// Display wrapper for Term that includes an interner for name resolution
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", self.interner.resolve_constant(c.id)),
            Term::Function(func, args) => {
                write!(f, "{}", self.interner.resolve_function(func.id))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg.display(self.interner))?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

// Display implementations that show IDs (for debugging without interner)

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}", self.id)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c.id),
            Term::Function(func, args) => {
                write!(f, "{}(", func.id)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
