//! Passive set: clauses waiting to be given
//!
//! Membership lives in one insertion-ordered set; every queue holds its own
//! ordering over the same ids. Removing a clause only touches the set, so
//! queues can hold stale ids until they are popped or cleaned.
//!
//! Selection is weighted round robin. The queue under the cursor hands out
//! up to its coefficient of live clauses before the cursor moves on; an
//! exhausted queue passes the turn early.

use crate::clause::{ClauseContext, ClauseId};
use crate::error::{Result, SaturnError};
use crate::queue::ClauseQueue;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// When stale queue entries are purged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CleanPolicy {
    /// Only on explicit `clean()` calls
    Manual,
    /// Every `interval` given clauses
    Periodic { interval: usize },
}

impl Default for CleanPolicy {
    fn default() -> Self {
        CleanPolicy::Periodic { interval: 1024 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassiveStats {
    pub size: usize,
    pub added: usize,
    pub selected: usize,
    pub stale_dropped: usize,
    pub cleaned: usize,
}

#[derive(Debug)]
pub struct PassiveSet {
    clauses: IndexSet<ClauseId>,
    queues: Vec<(ClauseQueue, u32)>,
    /// Live clauses handed out by each queue
    served: Vec<usize>,
    current: usize,
    taken: u32,
    stats: PassiveStats,
}

impl PassiveSet {
    /// A queue with coefficient 0 would never get a turn, so it is rejected
    pub fn new(queues: Vec<(ClauseQueue, u32)>) -> Result<Self> {
        if let Some((queue, _)) = queues.iter().find(|(_, coefficient)| *coefficient == 0) {
            return Err(SaturnError::ZeroCoefficient(queue.name().to_string()));
        }
        Ok(PassiveSet {
            clauses: IndexSet::new(),
            served: vec![0; queues.len()],
            queues,
            current: 0,
            taken: 0,
            stats: PassiveStats::default(),
        })
    }

    /// Insert clauses not yet present and offer them to every queue.
    /// Returns how many were new.
    pub fn add(&mut self, ctx: &ClauseContext, ids: &[ClauseId]) -> usize {
        let mut fresh = 0;
        for &id in ids {
            if !self.clauses.insert(id) {
                continue;
            }
            let clause = ctx.get(id);
            for (queue, _) in &mut self.queues {
                queue.add(clause);
            }
            fresh += 1;
        }
        self.stats.added += fresh;
        fresh
    }

    /// Forget `id`. Queue entries for it become stale.
    pub fn remove(&mut self, id: ClauseId) -> bool {
        self.clauses.shift_remove(&id)
    }

    /// Next clause by weighted round robin, removed from the set. `None`
    /// once no queue holds a live clause.
    pub fn next(&mut self) -> Option<ClauseId> {
        let count = self.queues.len();
        if count == 0 {
            return None;
        }
        // the first queue visited may be out of turns but not out of clauses
        let mut idle = 0;
        while idle <= count {
            let (queue, coefficient) = &mut self.queues[self.current];
            while self.taken < *coefficient && !queue.is_empty() {
                let id = queue.take_first();
                if self.clauses.shift_remove(&id) {
                    self.taken += 1;
                    self.served[self.current] += 1;
                    self.stats.selected += 1;
                    trace!(clause = %id, queue = queue.name(), "selected");
                    return Some(id);
                }
                self.stats.stale_dropped += 1;
                trace!(clause = %id, queue = queue.name(), "dropped stale entry");
            }
            self.current = (self.current + 1) % count;
            self.taken = 0;
            idle += 1;
        }
        None
    }

    /// Purge queue entries for clauses no longer in the set. Returns how
    /// many entries went.
    pub fn clean(&mut self) -> usize {
        let live = &self.clauses;
        let purged: usize = self
            .queues
            .iter_mut()
            .map(|(queue, _)| queue.clean(|id| live.contains(&id)))
            .sum();
        self.stats.cleaned += purged;
        debug!(purged, remaining = self.clauses.len(), "cleaned passive queues");
        purged
    }

    pub fn contains(&self, id: ClauseId) -> bool {
        self.clauses.contains(&id)
    }

    pub fn clauses(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.clauses.iter().copied()
    }

    pub fn queues(&self) -> &[(ClauseQueue, u32)] {
        &self.queues
    }

    /// How many clauses each queue has handed out, by queue name
    pub fn served(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.queues
            .iter()
            .zip(&self.served)
            .map(|((queue, _), &n)| (queue.name(), n))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn stats(&self) -> PassiveStats {
        PassiveStats {
            size: self.clauses.len(),
            ..self.stats
        }
    }
}
