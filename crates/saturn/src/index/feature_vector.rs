//! Feature vector indexing for subsumption filtering.
//!
//! If clause C subsumes clause D then feature(C) <= feature(D) componentwise,
//! because a substitution only adds symbols and each literal of C maps to a
//! literal of D with the same sign. The index stores every clause's vector
//! in a trie with one level per feature and answers both directions of the
//! filter with range walks.
//!
//! The feature set is fixed, so vectors never change length as new symbols
//! appear: literal counts and equation counts per sign, symbol counts per
//! sign, and symbol counts per sign hashed into a few buckets.

use super::ClauseIndex;
use crate::clause::{ClauseContext, ClauseId};
use crate::logic::{Literal, Term};
use std::collections::HashMap;

const BUCKETS: usize = 4;
const DIMENSION: usize = 6 + 2 * BUCKETS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureVector([u16; DIMENSION]);

impl FeatureVector {
    pub fn of(literals: &[Literal]) -> Self {
        let mut counts = [0u16; DIMENSION];
        for lit in literals {
            let sign = usize::from(lit.is_negative());
            bump(&mut counts[sign]);
            if lit.is_equation() {
                bump(&mut counts[2 + sign]);
            }
            for (_, term) in lit.sides() {
                count_symbols(term, sign, &mut counts);
            }
        }
        FeatureVector(counts)
    }

    /// self <= other componentwise (self could subsume other)
    pub fn compatible_as_subsumer(&self, other: &FeatureVector) -> bool {
        self.0.iter().zip(&other.0).all(|(a, b)| a <= b)
    }

    pub fn counts(&self) -> &[u16] {
        &self.0
    }
}

fn bump(slot: &mut u16) {
    *slot = slot.saturating_add(1);
}

fn count_symbols(term: &Term, sign: usize, counts: &mut [u16; DIMENSION]) {
    let bucket = match term {
        Term::Variable(_) => return,
        Term::Constant(c) => (c.id.as_u32() as usize * 2) % BUCKETS,
        Term::Function(f, _) => (f.id.as_u32() as usize * 2 + 1) % BUCKETS,
    };
    bump(&mut counts[4 + sign]);
    bump(&mut counts[6 + sign * BUCKETS + bucket]);
    if let Term::Function(_, args) = term {
        for arg in args {
            count_symbols(arg, sign, counts);
        }
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<u16, TrieNode>,
    clauses: Vec<ClauseId>,
}

impl TrieNode {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.clauses.is_empty()
    }
}

/// Subsumption candidate index keyed by feature vectors
#[derive(Debug, Default)]
pub struct FeatureVectorIndex {
    root: TrieNode,
    vectors: HashMap<ClauseId, FeatureVector>,
}

impl FeatureVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexed clauses C with feature(C) <= feature(target)
    pub fn find_potential_subsumers(&self, target: &[Literal]) -> Vec<ClauseId> {
        let fv = FeatureVector::of(target);
        let mut result = Vec::new();
        walk(&self.root, 0, &mut |depth, count| count <= fv.0[depth], &mut result);
        result
    }

    /// Indexed clauses D with feature(D) >= feature(source)
    pub fn find_potentially_subsumed(&self, source: &[Literal]) -> Vec<ClauseId> {
        let fv = FeatureVector::of(source);
        let mut result = Vec::new();
        walk(&self.root, 0, &mut |depth, count| count >= fv.0[depth], &mut result);
        result
    }

    pub fn vector(&self, id: ClauseId) -> Option<&FeatureVector> {
        self.vectors.get(&id)
    }

    /// Indexed ids with their vectors, sorted by id
    pub fn entries(&self) -> Vec<(ClauseId, FeatureVector)> {
        let mut out: Vec<_> = self.vectors.iter().map(|(&id, &fv)| (id, fv)).collect();
        out.sort();
        out
    }
}

fn walk(
    node: &TrieNode,
    depth: usize,
    admit: &mut dyn FnMut(usize, u16) -> bool,
    result: &mut Vec<ClauseId>,
) {
    result.extend_from_slice(&node.clauses);
    if depth == DIMENSION {
        return;
    }
    for (&count, child) in &node.children {
        if admit(depth, count) {
            walk(child, depth + 1, admit, result);
        }
    }
}

fn remove_at(node: &mut TrieNode, counts: &[u16], id: ClauseId) -> bool {
    match counts.split_first() {
        None => match node.clauses.iter().position(|&c| c == id) {
            Some(pos) => {
                node.clauses.swap_remove(pos);
                true
            }
            None => false,
        },
        Some((count, rest)) => {
            let Some(child) = node.children.get_mut(count) else {
                return false;
            };
            let removed = remove_at(child, rest, id);
            if removed && child.is_empty() {
                node.children.remove(count);
            }
            removed
        }
    }
}

impl ClauseIndex for FeatureVectorIndex {
    fn insert(&mut self, ctx: &ClauseContext, id: ClauseId) -> bool {
        if self.vectors.contains_key(&id) {
            return false;
        }
        let fv = FeatureVector::of(&ctx.get(id).literals);
        let mut node = &mut self.root;
        for &count in &fv.0 {
            node = node.children.entry(count).or_default();
        }
        node.clauses.push(id);
        self.vectors.insert(id, fv);
        true
    }

    fn remove(&mut self, _ctx: &ClauseContext, id: ClauseId) -> bool {
        let Some(fv) = self.vectors.remove(&id) else {
            return false;
        };
        remove_at(&mut self.root, &fv.0, id)
    }

    fn contains(&self, id: ClauseId) -> bool {
        self.vectors.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
