//! Saturn: the clause-set core of a saturation theorem prover
//!
//! This library holds the data structures a given-clause loop runs on:
//! hashconsed clauses with literal eligibility, term and clause indices,
//! the active, passive and simplification sets, and the clause queues that
//! decide which clause is given next. Inference rules and the loop itself
//! live with the caller.

pub mod clause;
pub mod config;
pub mod error;
pub mod index;
pub mod logic;
pub mod queue;
pub mod state;

#[cfg(test)]
mod test_support;

pub use clause::{Clause, ClauseContext, ClauseId, ClauseRole, LiteralSet, Provenance};
pub use config::SaturationConfig;
pub use error::{Result, SaturnError};
pub use index::{ClauseIndex, IndexKind, TermEntry, TermIndex};
pub use logic::{
    Comparison, Interner, Kbo, Literal, LiteralSelectionStrategy, LiteralSelector, Term,
    TermOrder, Variable,
};
pub use queue::{Accept, ClauseQueue, Profile, QueueSpec, WeightFn};
pub use state::{
    ActiveSet, CleanPolicy, Expert, PassiveSet, ProofState, SimplSet, StateStats, Verdict,
};
