use std::cmp::Ordering;
use std::fmt;
use std::mem;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::comparator::{Comparator, Natural};
use crate::error::Result;
use crate::options::Options;

/// A single node in the skip list.
///
/// Each node has `level + 1` forward links. Level 0 contains all nodes
/// (a regular linked list). Higher levels skip over nodes, enabling
/// O(log n) average-case search.
///
/// ```text
/// Level 3:  HEAD ──────────────────────────────► 50 ──────────► NIL
/// Level 2:  HEAD ──────────► 20 ────────────────► 50 ──────────► NIL
/// Level 1:  HEAD ──► 10 ──► 20 ────► 35 ────────► 50 ──► 60 ──► NIL
/// Level 0:  HEAD ──► 10 ──► 20 ──► 25 ──► 35 ──► 50 ──► 60 ──► 70 ► NIL
/// ```
///
/// Links are indices into `SkipList::nodes`. The length of `forward` is
/// fixed when the node is created.
struct Node<K, V> {
    key: K,
    value: V,
    forward: Vec<Option<usize>>,
}

/// A probabilistic sorted map. Not synchronized; see
/// [`SkipMap`](crate::SkipMap) for the thread-safe wrapper.
///
/// Average case: O(log n) insert, O(log n) lookup, O(n) iteration.
/// Worst case: O(n), but astronomically unlikely with random level assignment.
///
/// Nodes live in a dense arena. A predecessor in the search frontier is an
/// `Option<usize>` where `None` means the header.
pub struct SkipList<K, V, C = Natural> {
    nodes: Vec<Node<K, V>>,
    /// Header forward links, one slot per configured level.
    head: Vec<Option<usize>>,
    /// Highest level index currently in use.
    level: usize,
    len: usize,
    max_level: usize,
    probability: f64,
    comparator: C,
    /// Last node visited before the target at each level. Reused by every
    /// write, which already holds `&mut self`.
    update: Vec<Option<usize>>,
    rng: SmallRng,
}

impl<K: Ord, V> SkipList<K, V, Natural> {
    /// Create an empty skip list ordered by `K: Ord`, with default options.
    pub fn new() -> Self {
        Self::build(Natural, &Options::default())
    }

    /// Create an empty skip list ordered by `K: Ord`.
    pub fn with_options(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(Natural, &options))
    }
}

impl<K: Ord, V> Default for SkipList<K, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Create an empty skip list ordered by `comparator`, with default options.
    pub fn with_comparator(comparator: C) -> Self {
        Self::build(comparator, &Options::default())
    }

    /// Create an empty skip list ordered by `comparator`, rejecting
    /// out-of-range options.
    pub fn with_comparator_and_options(comparator: C, options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(comparator, &options))
    }

    fn build(comparator: C, options: &Options) -> Self {
        let rng = match options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        debug!(
            max_level = options.max_level,
            probability = options.probability,
            seeded = options.seed.is_some(),
            "created skip list"
        );
        SkipList {
            nodes: Vec::new(),
            head: vec![None; options.max_level],
            level: 0,
            len: 0,
            max_level: options.max_level,
            probability: options.probability,
            comparator,
            update: vec![None; options.max_level],
            rng,
        }
    }

    /// Number of entries in the skip list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the skip list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level index currently populated. 0 for an empty list.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of levels a node may use, fixed at construction.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Per-level promotion probability, fixed at construction.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Insert a key-value pair. Overwrites the value if the key already
    /// exists and returns the old one; the key and node shape are kept.
    ///
    /// Algorithm:
    ///   1. Find the insertion point at each level (track predecessors)
    ///   2. Generate a random level for the new node (coin flip per level)
    ///   3. Create node with that many forward links
    ///   4. Splice into the list at each level up to the node's level
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(found) = self.seek_frontier(&key) {
            if self.comparator.compare(&self.nodes[found].key, &key) == Ordering::Equal {
                return Some(mem::replace(&mut self.nodes[found].value, value));
            }
        }

        let new_level = self.random_level();
        if new_level > self.level {
            for slot in &mut self.update[self.level + 1..=new_level] {
                *slot = None;
            }
            trace!(from = self.level, to = new_level, "raised skip list level");
            self.level = new_level;
        }

        let idx = self.nodes.len();
        let forward = (0..=new_level)
            .map(|i| self.next_of(self.update[i], i))
            .collect();
        self.nodes.push(Node { key, value, forward });
        for i in 0..=new_level {
            self.set_next(self.update[i], i, Some(idx));
        }

        self.len += 1;
        None
    }

    /// Look up a key. Returns the value if found.
    ///
    /// Algorithm:
    ///   1. Start at head, highest level
    ///   2. Move forward while next key < target
    ///   3. Drop down one level
    ///   4. Repeat until level 0
    ///   5. Check if the node at level 0 matches
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Look up a key. Returns the stored key alongside the value, which can
    /// differ from `key` under a custom comparator.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let node = &self.nodes[self.lower_bound(key)?];
        match self.comparator.compare(&node.key, key) {
            Ordering::Equal => Some((&node.key, &node.value)),
            _ => None,
        }
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Remove a key, returning the stored pair if it was present.
    ///
    /// The node is unlinked bottom-up and the search stops at the first
    /// level where the predecessor no longer points at it. Empty top
    /// levels are then dropped so later searches don't scan them.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let target = self.seek_frontier(key)?;
        if self.comparator.compare(&self.nodes[target].key, key) != Ordering::Equal {
            return None;
        }

        for i in 0..=self.level {
            if self.next_of(self.update[i], i) != Some(target) {
                break;
            }
            let after = self.nodes[target].forward[i];
            self.set_next(self.update[i], i, after);
        }

        let before = self.level;
        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }
        if self.level != before {
            trace!(from = before, to = self.level, "lowered skip list level");
        }

        self.len -= 1;
        let node = self.release(target);
        Some((node.key, node.value))
    }

    /// Visit entries with `start <= key <= end` in order until `visit`
    /// returns `false`. Nothing is visited when `start > end`.
    pub fn range_with<'a, F>(&'a self, start: &K, end: &K, mut visit: F)
    where
        F: FnMut(&'a K, &'a V) -> bool,
    {
        let mut current = self.lower_bound(start);
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if self.comparator.compare(&node.key, end) == Ordering::Greater {
                break;
            }
            if !visit(&node.key, &node.value) {
                break;
            }
            current = node.forward[0];
        }
    }

    /// Values with `start <= key <= end`, in key order.
    pub fn range(&self, start: &K, end: &K) -> Vec<&V> {
        let mut out = Vec::new();
        self.range_with(start, end, |_, v| {
            out.push(v);
            true
        });
        out
    }

    /// Smallest entry. O(1): it is always the header's level-0 successor.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.head[0].map(|idx| {
            let node = &self.nodes[idx];
            (&node.key, &node.value)
        })
    }

    /// Largest entry, found by running right-then-down from the top level.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut current = None;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.next_of(current, i) {
                current = Some(next);
            }
        }
        current.map(|idx| {
            let node = &self.nodes[idx];
            (&node.key, &node.value)
        })
    }

    /// Drop every entry and release the arena's memory. Configuration and
    /// the RNG state are kept.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing skip list");
        self.nodes = Vec::new();
        self.head.fill(None);
        self.update.fill(None);
        self.level = 0;
        self.len = 0;
    }

    /// Number of nodes the arena can hold without reallocating.
    ///
    /// `remove` keeps the arena's capacity for later inserts; call
    /// [`shrink_to_fit`](Self::shrink_to_fit) to give it back.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Shrink the arena to the live entry count.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Iterate all entries in sorted order by following level 0.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            current: self.head[0],
            remaining: self.len,
        }
    }

    /// Generate a random level for a new node: count successful coin flips,
    /// capped at `max_level - 1`.
    fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level + 1 < self.max_level && self.rng.gen_bool(self.probability) {
            level += 1;
        }
        level
    }

    fn next_of(&self, pred: Option<usize>, level: usize) -> Option<usize> {
        match pred {
            None => self.head[level],
            Some(idx) => self.nodes[idx].forward[level],
        }
    }

    fn set_next(&mut self, pred: Option<usize>, level: usize, next: Option<usize>) {
        match pred {
            None => self.head[level] = next,
            Some(idx) => self.nodes[idx].forward[level] = next,
        }
    }

    /// First node whose key is not less than `key`.
    fn lower_bound(&self, key: &K) -> Option<usize> {
        let mut current = None;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.next_of(current, i) {
                if self.comparator.compare(&self.nodes[next].key, key) != Ordering::Less {
                    break;
                }
                current = Some(next);
            }
        }
        self.next_of(current, 0)
    }

    /// Same walk as `lower_bound`, recording the predecessor at every
    /// active level into `self.update`.
    fn seek_frontier(&mut self, key: &K) -> Option<usize> {
        let mut current = None;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.next_of(current, i) {
                if self.comparator.compare(&self.nodes[next].key, key) != Ordering::Less {
                    break;
                }
                current = Some(next);
            }
            self.update[i] = current;
        }
        self.next_of(current, 0)
    }

    /// Take an already unlinked node out of the arena.
    ///
    /// `swap_remove` moves the last node into `idx`, so every link to the
    /// last slot is redirected first. Those links belong to the moved node's
    /// predecessors, found by searching for its key.
    fn release(&mut self, idx: usize) -> Node<K, V> {
        let last = self.nodes.len() - 1;
        if idx != last {
            let height = self.nodes[last].forward.len();
            let mut current = None;
            for i in (0..=self.level).rev() {
                while let Some(next) = self.next_of(current, i) {
                    if next == last
                        || self
                            .comparator
                            .compare(&self.nodes[next].key, &self.nodes[last].key)
                            != Ordering::Less
                    {
                        break;
                    }
                    current = Some(next);
                }
                if i < height {
                    self.set_next(current, i, Some(idx));
                }
            }
        }
        self.nodes.swap_remove(idx)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SkipList<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = Iter {
            nodes: &self.nodes,
            current: self.head[0],
            remaining: self.len,
        };
        f.debug_map().entries(entries).finish()
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a SkipList<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over skip list entries in sorted order.
///
/// Simply follows level 0 forward links. Level 0 is a sorted linked list
/// containing every entry.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    current: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.current?];
        self.current = node.forward[0];
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
