//! Accept predicates: which clauses a queue takes in

use crate::clause::Clause;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub enum Accept {
    #[default]
    All,
    /// Every literal negative
    Goals,
    /// Every literal positive
    NonGoals,
    /// No free variables
    Ground,
    /// Exactly one literal, positive
    PosUnit,
    /// At most one positive literal
    Horn,
    /// Flagged as a lemma
    Lemmas,
    Custom(Arc<dyn Fn(&Clause) -> bool + Send + Sync>),
}

impl Accept {
    pub fn accepts(&self, clause: &Clause) -> bool {
        match self {
            Accept::All => true,
            Accept::Goals => clause.literals.iter().all(|l| l.is_negative()),
            Accept::NonGoals => clause.literals.iter().all(|l| l.is_positive()),
            Accept::Ground => clause.is_ground(),
            Accept::PosUnit => clause.is_unit() && clause.literals[0].is_positive(),
            Accept::Horn => clause.positive_count() <= 1,
            Accept::Lemmas => clause.is_lemma(),
            Accept::Custom(f) => f(clause),
        }
    }
}

impl fmt::Debug for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accept::All => "All",
            Accept::Goals => "Goals",
            Accept::NonGoals => "NonGoals",
            Accept::Ground => "Ground",
            Accept::PosUnit => "PosUnit",
            Accept::Horn => "Horn",
            Accept::Lemmas => "Lemmas",
            Accept::Custom(_) => "Custom",
        };
        write!(f, "{}", name)
    }
}
