//! Hashconsed clauses and the literal-eligibility rules built on them

pub mod context;
pub mod eligibility;
pub mod literal_set;
pub mod record;

#[cfg(test)]
mod clause_proptest;

pub use context::{ClauseContext, ContextStats};
pub use literal_set::LiteralSet;
pub use record::{Clause, ClauseDisplay, ClauseFlags, ClauseId, ClauseRole, Provenance};
