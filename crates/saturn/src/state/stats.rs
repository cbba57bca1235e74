//! Counters collected across the proof state, serializable to JSON

use super::active::ActiveStats;
use super::passive::PassiveStats;
use crate::clause::ContextStats;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateStats {
    pub clauses: ContextStats,
    pub active: ActiveStats,
    pub passive: PassiveStats,
    pub simpl_size: usize,
    /// Clauses handed out by `next_given`
    pub given: usize,
    pub incomplete: bool,
}

impl StateStats {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
