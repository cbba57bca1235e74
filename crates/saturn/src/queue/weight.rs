//! Clause weight functions for passive queues
//!
//! A weight is a non-negative integer; queues hand out lighter clauses
//! first. `Age` gives creation order, which is the fair choice every
//! complete profile needs at least one queue of.

use crate::clause::Clause;
use crate::error::{Result, SaturnError};
use std::fmt;
use std::sync::Arc;

/// Goal distances at or past this value all weigh the same
pub const GOAL_DISTANCE_THRESHOLD: u32 = 10;

#[derive(Clone)]
pub enum WeightFn {
    /// Creation order; the empty clause weighs 0
    Age,
    /// Literal complexity: positive literals count double, plus one per
    /// literal
    Default,
    /// `Default` scaled by the distance to the nearest goal ancestor,
    /// saturating at `threshold`. Clauses with no goal ancestor count as
    /// being at the threshold.
    FavorConjecture { threshold: u32 },
    /// Coefficient-weighted sum with positive coefficients; see
    /// [`WeightFn::combine`]
    Combine(Vec<(WeightFn, u64)>),
    Custom(Arc<dyn Fn(&Clause) -> u64 + Send + Sync>),
}

impl WeightFn {
    pub fn favor_conjecture() -> Self {
        WeightFn::FavorConjecture {
            threshold: GOAL_DISTANCE_THRESHOLD,
        }
    }

    /// `Combine` over `parts`, rejecting a zero coefficient
    pub fn combine(parts: Vec<(WeightFn, u64)>) -> Result<Self> {
        if let Some((f, _)) = parts.iter().find(|(_, coeff)| *coeff == 0) {
            return Err(SaturnError::ZeroCoefficient(format!("{:?}", f)));
        }
        Ok(WeightFn::Combine(parts))
    }

    pub fn weigh(&self, clause: &Clause) -> u64 {
        match self {
            WeightFn::Age => {
                if clause.is_empty() {
                    0
                } else {
                    u64::from(clause.id.as_u32())
                }
            }
            WeightFn::Default => default_weight(clause),
            WeightFn::FavorConjecture { threshold } => {
                let distance = clause.distance_to_goal.unwrap_or(*threshold).min(*threshold);
                default_weight(clause).saturating_mul(u64::from(distance) + 1)
            }
            WeightFn::Combine(parts) => parts
                .iter()
                .map(|(f, coeff)| f.weigh(clause).saturating_mul(*coeff))
                .fold(0u64, u64::saturating_add),
            WeightFn::Custom(f) => f(clause),
        }
    }
}

fn default_weight(clause: &Clause) -> u64 {
    let literals: u64 = clause
        .literals
        .iter()
        .map(|lit| if lit.is_positive() { 2 * lit.weight() } else { lit.weight() })
        .sum();
    literals + clause.len() as u64
}

impl fmt::Debug for WeightFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightFn::Age => write!(f, "Age"),
            WeightFn::Default => write!(f, "Default"),
            WeightFn::FavorConjecture { threshold } => {
                write!(f, "FavorConjecture({})", threshold)
            }
            WeightFn::Combine(parts) => f.debug_list().entries(parts.iter()).finish(),
            WeightFn::Custom(_) => write!(f, "Custom"),
        }
    }
}
