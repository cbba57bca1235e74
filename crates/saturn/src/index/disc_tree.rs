//! Discrimination tree over flattened terms.
//!
//! Terms are flattened into preorder key sequences and stored in a trie.
//! Indexed variables become `Star` and match any subterm at retrieval time.
//! Entries are stored at the leaves; inserting the same `(term, value)` twice
//! stores it twice, and `remove` takes out exactly one copy and prunes empty
//! branches, so the tree shape always equals the shape a fresh build of the
//! remaining entries would have.

use super::TermIndex;
use crate::logic::{ConstantId, FunctionId, Term};
use std::collections::HashMap;

/// Key type for a single node in the flattened preorder traversal of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlatKey {
    /// Function symbol with arity (arity needed for skip counts during Star traversal)
    Func(FunctionId, u8),
    Const(ConstantId),
    /// Variable in the indexed term (matches anything during retrieval)
    Star,
    /// Variable in a generalization query (only Star matches it)
    Var(u32),
}

#[derive(Debug)]
struct DiscTreeNode<V> {
    children: HashMap<FlatKey, DiscTreeNode<V>>,
    entries: Vec<V>,
}

impl<V> Default for DiscTreeNode<V> {
    fn default() -> Self {
        DiscTreeNode {
            children: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> DiscTreeNode<V> {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.entries.is_empty()
    }
}

/// Flatten a term for insertion: preorder traversal, variables become Star.
pub fn flatten_insert(term: &Term, keys: &mut Vec<FlatKey>) {
    match term {
        Term::Variable(_) => keys.push(FlatKey::Star),
        Term::Constant(c) => keys.push(FlatKey::Const(c.id)),
        Term::Function(f, args) => {
            keys.push(FlatKey::Func(f.id, f.arity));
            for arg in args {
                flatten_insert(arg, keys);
            }
        }
    }
}

/// Flatten a term for generalization queries: variables become Var(id).
pub fn flatten_query(term: &Term, keys: &mut Vec<FlatKey>) {
    match term {
        Term::Variable(v) => keys.push(FlatKey::Var(v.id)),
        Term::Constant(c) => keys.push(FlatKey::Const(c.id)),
        Term::Function(f, args) => {
            keys.push(FlatKey::Func(f.id, f.arity));
            for arg in args {
                flatten_query(arg, keys);
            }
        }
    }
}

/// Count the number of flat keys a subterm occupies starting at `pos`.
pub fn subterm_size(keys: &[FlatKey], pos: usize) -> usize {
    if pos >= keys.len() {
        return 0;
    }
    match keys[pos] {
        FlatKey::Star | FlatKey::Const(_) | FlatKey::Var(_) => 1,
        FlatKey::Func(_, arity) => {
            let mut size = 1;
            for _ in 0..arity {
                size += subterm_size(keys, pos + size);
            }
            size
        }
    }
}

#[derive(Debug)]
pub struct DiscTree<V> {
    root: DiscTreeNode<V>,
    len: usize,
}

impl<V> Default for DiscTree<V> {
    fn default() -> Self {
        DiscTree {
            root: DiscTreeNode::default(),
            len: 0,
        }
    }
}

impl<V: Clone + PartialEq> DiscTree<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries whose indexed term generalizes `query` (matches it one-way)
    pub fn retrieve_generalizations(&self, query: &Term) -> Vec<&V> {
        let mut keys = Vec::new();
        flatten_query(query, &mut keys);
        let mut results = Vec::new();
        generalizations(&self.root, &keys, 0, &mut results);
        results
    }

    /// Entries whose indexed term is an instance of `query`
    pub fn retrieve_instances(&self, query: &Term) -> Vec<&V> {
        let mut keys = Vec::new();
        flatten_insert(query, &mut keys);
        let mut results = Vec::new();
        instances(&self.root, &keys, 0, &mut results);
        results
    }

    /// Entries whose indexed term may unify with `query`. This is a filter:
    /// repeated variables are not checked for consistency.
    pub fn retrieve_unifiable(&self, query: &Term) -> Vec<&V> {
        let mut keys = Vec::new();
        flatten_insert(query, &mut keys);
        let mut results = Vec::new();
        unifiable(&self.root, &keys, 0, &mut results);
        results
    }

    /// Every stored `(key path, value)` pair, sorted
    pub fn entries(&self) -> Vec<(Vec<FlatKey>, V)>
    where
        V: Ord,
    {
        let mut out = Vec::with_capacity(self.len);
        let mut path = Vec::new();
        collect(&self.root, &mut path, &mut out);
        out.sort();
        out
    }
}

impl<V: Clone + PartialEq> TermIndex<V> for DiscTree<V> {
    fn insert(&mut self, term: &Term, value: V) {
        let mut keys = Vec::new();
        flatten_insert(term, &mut keys);
        let mut current = &mut self.root;
        for key in keys {
            current = current.children.entry(key).or_default();
        }
        current.entries.push(value);
        self.len += 1;
    }

    fn remove(&mut self, term: &Term, value: &V) -> bool {
        let mut keys = Vec::new();
        flatten_insert(term, &mut keys);
        let removed = remove_at(&mut self.root, &keys, value);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn len(&self) -> usize {
        self.len
    }
}

fn remove_at<V: PartialEq>(node: &mut DiscTreeNode<V>, keys: &[FlatKey], value: &V) -> bool {
    match keys.split_first() {
        None => match node.entries.iter().position(|e| e == value) {
            Some(pos) => {
                node.entries.swap_remove(pos);
                true
            }
            None => false,
        },
        Some((key, rest)) => {
            let Some(child) = node.children.get_mut(key) else {
                return false;
            };
            let removed = remove_at(child, rest, value);
            if removed && child.is_empty() {
                node.children.remove(key);
            }
            removed
        }
    }
}

fn collect<V: Clone>(node: &DiscTreeNode<V>, path: &mut Vec<FlatKey>, out: &mut Vec<(Vec<FlatKey>, V)>) {
    for value in &node.entries {
        out.push((path.clone(), value.clone()));
    }
    for (key, child) in &node.children {
        path.push(*key);
        collect(child, path, out);
        path.pop();
    }
}

fn generalizations<'a, V>(
    node: &'a DiscTreeNode<V>,
    query: &[FlatKey],
    pos: usize,
    results: &mut Vec<&'a V>,
) {
    if pos == query.len() {
        results.extend(node.entries.iter());
        return;
    }
    let key = query[pos];
    if let Some(child) = node.children.get(&key) {
        generalizations(child, query, pos + 1, results);
    }
    // A trie Star generalizes any query subterm
    if key != FlatKey::Star {
        if let Some(star_child) = node.children.get(&FlatKey::Star) {
            let skip = subterm_size(query, pos);
            generalizations(star_child, query, pos + skip, results);
        }
    }
}

fn instances<'a, V>(
    node: &'a DiscTreeNode<V>,
    query: &[FlatKey],
    pos: usize,
    results: &mut Vec<&'a V>,
) {
    if pos == query.len() {
        results.extend(node.entries.iter());
        return;
    }
    match query[pos] {
        FlatKey::Star => skip_trie_term(node, 1, &mut |n| instances(n, query, pos + 1, results)),
        key => {
            if let Some(child) = node.children.get(&key) {
                instances(child, query, pos + 1, results);
            }
        }
    }
}

fn unifiable<'a, V>(
    node: &'a DiscTreeNode<V>,
    query: &[FlatKey],
    pos: usize,
    results: &mut Vec<&'a V>,
) {
    if pos == query.len() {
        results.extend(node.entries.iter());
        return;
    }
    match query[pos] {
        FlatKey::Star => skip_trie_term(node, 1, &mut |n| unifiable(n, query, pos + 1, results)),
        key => {
            if let Some(child) = node.children.get(&key) {
                unifiable(child, query, pos + 1, results);
            }
            if let Some(star_child) = node.children.get(&FlatKey::Star) {
                let skip = subterm_size(query, pos);
                unifiable(star_child, query, pos + skip, results);
            }
        }
    }
}

/// Walk every trie path that spells `remaining` complete subterms and call
/// `k` on the node reached after them.
fn skip_trie_term<'a, V>(
    node: &'a DiscTreeNode<V>,
    remaining: usize,
    k: &mut dyn FnMut(&'a DiscTreeNode<V>),
) {
    if remaining == 0 {
        k(node);
        return;
    }
    for (key, child) in &node.children {
        let next = match key {
            FlatKey::Func(_, arity) => remaining - 1 + *arity as usize,
            _ => remaining - 1,
        };
        skip_trie_term(child, next, k);
    }
}
