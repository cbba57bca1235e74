//! Named queue profiles and custom queue lists

use super::ClauseQueue;
use crate::error::{Result, SaturnError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Preset `(queue, coefficient)` lists. Every preset includes `fifo` so the
/// passive set stays fair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Mostly lightest-first, one in five by age
    #[default]
    Default,
    /// Pure breadth-first
    Bfs,
    /// Weight plus one slot each for every structural class
    Explore,
    /// Prefers ground clauses
    Ground,
    /// Prefers clauses close to the negated conjecture
    Goal,
}

impl Profile {
    pub const ALL: [Profile; 5] = [
        Profile::Default,
        Profile::Bfs,
        Profile::Explore,
        Profile::Ground,
        Profile::Goal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Bfs => "bfs",
            Profile::Explore => "explore",
            Profile::Ground => "ground",
            Profile::Goal => "goal",
        }
    }

    pub fn specs(self) -> Vec<QueueSpec> {
        let list: &[(&str, u32)] = match self {
            Profile::Default => &[("clause_weight", 4), ("fifo", 1)],
            Profile::Bfs => &[("fifo", 1)],
            Profile::Explore => &[
                ("clause_weight", 4),
                ("goals", 1),
                ("non_goals", 1),
                ("pos_unit_clauses", 1),
                ("horn", 1),
                ("lemmas", 1),
                ("fifo", 1),
            ],
            Profile::Ground => &[("ground", 5), ("clause_weight", 2), ("fifo", 1)],
            Profile::Goal => &[("goal_oriented", 5), ("clause_weight", 1), ("fifo", 1)],
        };
        list.iter()
            .map(|&(name, coefficient)| QueueSpec::new(name, coefficient))
            .collect()
    }

    pub fn queues(self) -> Vec<(ClauseQueue, u32)> {
        // preset names are all known and coefficients non-zero
        self.specs()
            .into_iter()
            .filter_map(|spec| Some((ClauseQueue::named(&spec.name).ok()?, spec.coefficient)))
            .collect()
    }
}

impl FromStr for Profile {
    type Err = SaturnError;

    fn from_str(s: &str) -> Result<Self> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SaturnError::UnknownProfile(s.to_string()))
    }
}

/// One entry of a custom queue list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSpec {
    pub name: String,
    /// Clauses taken from this queue per round robin cycle
    pub coefficient: u32,
}

impl QueueSpec {
    pub fn new(name: &str, coefficient: u32) -> Self {
        QueueSpec {
            name: name.to_string(),
            coefficient,
        }
    }
}

pub fn build_queues(specs: &[QueueSpec]) -> Result<Vec<(ClauseQueue, u32)>> {
    if specs.is_empty() {
        return Err(SaturnError::EmptyProfile);
    }
    let queues = specs
        .iter()
        .map(|spec| {
            if spec.coefficient == 0 {
                return Err(SaturnError::ZeroCoefficient(spec.name.clone()));
            }
            Ok((ClauseQueue::named(&spec.name)?, spec.coefficient))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(
        queues = ?queues.iter().map(|(q, c)| (q.name(), *c)).collect::<Vec<_>>(),
        "built passive queues"
    );
    Ok(queues)
}
