//! Clause sets of the given-clause loop and the proof state that owns them

pub mod active;
pub mod passive;
pub mod proof_state;
pub mod simpl;
pub mod stats;

#[cfg(test)]
mod active_proptest;

pub use active::{indexed_sides, ActiveSet, ActiveSnapshot, ActiveStats};
pub use passive::{CleanPolicy, PassiveSet, PassiveStats};
pub use proof_state::{Expert, ProofState, Verdict};
pub use simpl::SimplSet;
pub use stats::StateStats;
