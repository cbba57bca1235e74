//! Clause records stored in the clause arena

use super::literal_set::LiteralSet;
use crate::logic::{Interner, Literal, Variable};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Handle of a clause in its `ClauseContext`. Ids are dense and assigned in
/// creation order, so a smaller id means an older clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClauseId(pub(crate) u32);

impl ClauseId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a clause in the proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseRole {
    #[default]
    Axiom,
    Hypothesis,
    Definition,
    /// Negated conjecture (goal)
    NegatedConjecture,
    /// Produced by an expert as an auxiliary lemma
    Lemma,
    /// Produced by an inference
    Derived,
}

/// Where a clause came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    pub role: ClauseRole,
    /// Name of the rule (or "input") that produced the clause
    pub rule: String,
    /// Persistent clauses survive backtracking of the proof state
    #[serde(default)]
    pub persistent: bool,
}

impl Provenance {
    pub fn input(role: ClauseRole) -> Self {
        Provenance {
            role,
            rule: "input".to_string(),
            persistent: false,
        }
    }

    pub fn derived(rule: &str) -> Self {
        Provenance {
            role: ClauseRole::Derived,
            rule: rule.to_string(),
            persistent: false,
        }
    }

    pub fn lemma(rule: &str) -> Self {
        Provenance {
            role: ClauseRole::Lemma,
            rule: rule.to_string(),
            persistent: false,
        }
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

/// Ground / lemma / persistent bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClauseFlags(u8);

impl ClauseFlags {
    pub const GROUND: ClauseFlags = ClauseFlags(1);
    pub const LEMMA: ClauseFlags = ClauseFlags(1 << 1);
    pub const PERSISTENT: ClauseFlags = ClauseFlags(1 << 2);

    pub fn empty() -> Self {
        ClauseFlags(0)
    }

    pub fn contains(self, other: ClauseFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: ClauseFlags) {
        self.0 |= other.0;
    }
}

/// A hashconsed clause.
///
/// Everything except `descendants` is fixed at creation. `descendants` only
/// grows.
#[derive(Debug, Clone)]
pub struct Clause {
    pub id: ClauseId,
    pub literals: Arc<[Literal]>,
    pub selected: LiteralSet,
    pub flags: ClauseFlags,
    pub weight: u64,
    /// Free variables in first-occurrence order
    pub variables: Vec<Variable>,
    pub parents: Vec<ClauseId>,
    pub descendants: IndexSet<ClauseId>,
    pub provenance: Provenance,
    /// Derivation steps from the nearest negated-conjecture ancestor
    pub distance_to_goal: Option<u32>,
    /// Ordering epoch the clause was created under
    pub epoch: u32,
}

impl Clause {
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn is_ground(&self) -> bool {
        self.flags.contains(ClauseFlags::GROUND)
    }

    pub fn is_lemma(&self) -> bool {
        self.flags.contains(ClauseFlags::LEMMA)
    }

    pub fn is_persistent(&self) -> bool {
        self.flags.contains(ClauseFlags::PERSISTENT)
    }

    pub fn positive_count(&self) -> usize {
        self.literals.iter().filter(|l| l.is_positive()).count()
    }

    pub fn positive_literals(&self) -> LiteralSet {
        (0..self.len()).filter(|&i| self.literals[i].is_positive()).collect()
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            interner,
        }
    }
}

pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    interner: &'a Interner,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clause.is_empty() {
            return write!(f, "$false");
        }
        for (i, lit) in self.clause.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", lit.display(self.interner))?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "$false");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
