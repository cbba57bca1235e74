//! Literals: equations, signed propositions and the two truth constants

use crate::logic::interner::Interner;
use crate::logic::substitution::{instantiate, Renaming, ScopedSubstitution};
use crate::logic::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a literal a term sits on. A proposition has only `Left`
/// (its atom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Equation { lhs: Term, rhs: Term, positive: bool },
    Prop { atom: Term, positive: bool },
    True,
    False,
}

impl Literal {
    pub fn equal(lhs: Term, rhs: Term) -> Self {
        Literal::Equation {
            lhs,
            rhs,
            positive: true,
        }
    }

    pub fn not_equal(lhs: Term, rhs: Term) -> Self {
        Literal::Equation {
            lhs,
            rhs,
            positive: false,
        }
    }

    pub fn pos(atom: Term) -> Self {
        Literal::Prop {
            atom,
            positive: true,
        }
    }

    pub fn neg(atom: Term) -> Self {
        Literal::Prop {
            atom,
            positive: false,
        }
    }

    /// `True` and `False` count as positive: they are atoms, not negations.
    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Equation { positive, .. } | Literal::Prop { positive, .. } => *positive,
            Literal::True | Literal::False => true,
        }
    }

    pub fn is_negative(&self) -> bool {
        !self.is_positive()
    }

    pub fn is_equation(&self) -> bool {
        matches!(self, Literal::Equation { .. })
    }

    pub fn complement(&self) -> Literal {
        match self {
            Literal::Equation { lhs, rhs, positive } => Literal::Equation {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
                positive: !positive,
            },
            Literal::Prop { atom, positive } => Literal::Prop {
                atom: atom.clone(),
                positive: !positive,
            },
            Literal::True => Literal::False,
            Literal::False => Literal::True,
        }
    }

    /// The terms the indices traverse, tagged with their side
    pub fn sides(&self) -> Vec<(Side, &Term)> {
        match self {
            Literal::Equation { lhs, rhs, .. } => vec![(Side::Left, lhs), (Side::Right, rhs)],
            Literal::Prop { atom, .. } => vec![(Side::Left, atom)],
            Literal::True | Literal::False => Vec::new(),
        }
    }

    pub fn side(&self, side: Side) -> Option<&Term> {
        match (self, side) {
            (Literal::Equation { lhs, .. }, Side::Left) => Some(lhs),
            (Literal::Equation { rhs, .. }, Side::Right) => Some(rhs),
            (Literal::Prop { atom, .. }, Side::Left) => Some(atom),
            _ => None,
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Literal::Equation { lhs, rhs, .. } => lhs.weight() + rhs.weight(),
            Literal::Prop { atom, .. } => atom.weight(),
            Literal::True | Literal::False => 1,
        }
    }

    pub fn collect_variables(&self, vars: &mut Vec<Variable>) {
        for (_, term) in self.sides() {
            term.collect_variables(vars);
        }
    }

    pub fn is_ground(&self) -> bool {
        self.sides().iter().all(|(_, t)| t.is_ground())
    }

    /// Multiset of terms used to lift the term ordering to literals.
    /// A negative literal counts its terms twice so that it outranks the
    /// positive literal over the same terms.
    pub fn ordering_multiset(&self) -> Vec<&Term> {
        let twice = if self.is_negative() { 2 } else { 1 };
        let mut out = Vec::new();
        for _ in 0..twice {
            for (_, term) in self.sides() {
                out.push(term);
            }
        }
        out
    }

    /// Rebuild with every term passed through `f`
    pub fn map_terms(&self, mut f: impl FnMut(&Term) -> Term) -> Literal {
        match self {
            Literal::Equation { lhs, rhs, positive } => Literal::Equation {
                lhs: f(lhs),
                rhs: f(rhs),
                positive: *positive,
            },
            Literal::Prop { atom, positive } => Literal::Prop {
                atom: f(atom),
                positive: *positive,
            },
            Literal::True => Literal::True,
            Literal::False => Literal::False,
        }
    }

    /// Instantiate under a scoped substitution. Pass the same `renaming` for
    /// every literal of one clause.
    pub fn instantiate(
        &self,
        scope: u8,
        subst: &ScopedSubstitution,
        renaming: &mut Renaming,
    ) -> Literal {
        self.map_terms(|t| instantiate(t, scope, subst, renaming))
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            interner,
        }
    }
}

pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    interner: &'a Interner,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal {
            Literal::Equation { lhs, rhs, positive } => {
                let op = if *positive { "=" } else { "!=" };
                write!(
                    f,
                    "{} {} {}",
                    lhs.display(self.interner),
                    op,
                    rhs.display(self.interner)
                )
            }
            Literal::Prop { atom, positive } => {
                if !positive {
                    write!(f, "~")?;
                }
                write!(f, "{}", atom.display(self.interner))
            }
            Literal::True => write!(f, "$true"),
            Literal::False => write!(f, "$false"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Equation { lhs, rhs, positive } => {
                write!(f, "{} {} {}", lhs, if *positive { "=" } else { "!=" }, rhs)
            }
            Literal::Prop { atom, positive } => {
                write!(f, "{}{}", if *positive { "" } else { "~" }, atom)
            }
            Literal::True => write!(f, "$true"),
            Literal::False => write!(f, "$false"),
        }
    }
}
