//! Clause queues for the passive set.
//!
//! A queue orders clauses by `(weight, id)`, so equal weights go to the
//! older clause. Storage is an `im::OrdSet`, which makes cloning a queue
//! cheap and lets `inserted` behave as a persistent insert.

pub mod accept;
pub mod profile;
pub mod weight;

use crate::clause::{Clause, ClauseId};
use crate::error::{Result, SaturnError};
use im::OrdSet;
use tracing::trace;

pub use accept::Accept;
pub use profile::{build_queues, Profile, QueueSpec};
pub use weight::{WeightFn, GOAL_DISTANCE_THRESHOLD};

/// Names accepted by [`ClauseQueue::named`]
pub const QUEUE_NAMES: &[&str] = &[
    "fifo",
    "clause_weight",
    "goals",
    "non_goals",
    "ground",
    "pos_unit_clauses",
    "horn",
    "lemmas",
    "goal_oriented",
];

#[derive(Debug, Clone)]
pub struct ClauseQueue {
    name: String,
    weight: WeightFn,
    accept: Accept,
    items: OrdSet<(u64, ClauseId)>,
}

impl ClauseQueue {
    pub fn new(name: impl Into<String>, weight: WeightFn, accept: Accept) -> Self {
        ClauseQueue {
            name: name.into(),
            weight,
            accept,
            items: OrdSet::new(),
        }
    }

    /// One of the predefined queues in [`QUEUE_NAMES`]
    pub fn named(name: &str) -> Result<Self> {
        let (weight, accept) = match name {
            "fifo" => (WeightFn::Age, Accept::All),
            "clause_weight" => (WeightFn::Default, Accept::All),
            "goals" => (WeightFn::Default, Accept::Goals),
            "non_goals" => (WeightFn::Default, Accept::NonGoals),
            "ground" => (WeightFn::Default, Accept::Ground),
            "pos_unit_clauses" => (WeightFn::Default, Accept::PosUnit),
            "horn" => (WeightFn::Default, Accept::Horn),
            "lemmas" => (WeightFn::Default, Accept::Lemmas),
            "goal_oriented" => (WeightFn::favor_conjecture(), Accept::All),
            other => return Err(SaturnError::UnknownQueue(other.to_string())),
        };
        Ok(ClauseQueue::new(name, weight, accept))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Push `clause` unless the accept predicate rejects it. Returns whether
    /// the queue now holds it.
    pub fn add(&mut self, clause: &Clause) -> bool {
        if !self.accept.accepts(clause) {
            trace!(queue = %self.name, clause = %clause.id, "rejected");
            return false;
        }
        let key = (self.weight.weigh(clause), clause.id);
        self.items.insert(key);
        true
    }

    /// Persistent form of [`add`](Self::add); `self` is left untouched
    pub fn inserted(&self, clause: &Clause) -> Self {
        let mut next = self.clone();
        next.add(clause);
        next
    }

    /// Pop the lightest clause.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Callers check [`is_empty`](Self::is_empty)
    /// first.
    pub fn take_first(&mut self) -> ClauseId {
        match self.items.remove_min() {
            Some((_, id)) => id,
            None => panic!("take_first on empty queue {}", self.name),
        }
    }

    pub fn peek(&self) -> Option<ClauseId> {
        self.items.get_min().map(|&(_, id)| id)
    }

    /// Drop every entry whose id fails `live`; returns how many went
    pub fn clean(&mut self, live: impl Fn(ClauseId) -> bool) -> usize {
        let dead: Vec<_> = self.items.iter().filter(|&&(_, id)| !live(id)).copied().collect();
        for key in &dead {
            self.items.remove(key);
        }
        dead.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
