pub mod skiplist;

use std::fmt;

use parking_lot::RwLock;

use crate::comparator::{Comparator, Natural};
use crate::error::Result;
use crate::options::Options;
use skiplist::SkipList;

/// Thread-safe ordered map. Wraps a [`SkipList`] in one reader/writer lock.
///
/// Reads (`get`, `range`, `range_func`, `min`, `max`, `len`, ...) share the
/// lock; `put`, `remove`, `take` and `clear` hold it exclusively. Every
/// call therefore observes a state the map was actually in, never a
/// half-spliced node.
///
/// Read methods take the lock recursively, so a
/// [`range_func`](SkipMap::range_func) visitor may read the same map even
/// while a writer is queued. Writers can wait longer under a steady
/// stream of readers as a result.
///
/// Values handed back across the lock are cloned. Use
/// [`range_func`](SkipMap::range_func) to look at entries in place.
///
/// Share between threads with `Arc<SkipMap<K, V>>`.
pub struct SkipMap<K, V, C = Natural> {
    inner: RwLock<SkipList<K, V, C>>,
}

impl<K: Ord, V> SkipMap<K, V, Natural> {
    /// Create an empty map ordered by `K: Ord`.
    pub fn new() -> Self {
        SkipMap {
            inner: RwLock::new(SkipList::new()),
        }
    }

    /// Create an empty map ordered by `K: Ord`, rejecting out-of-range options.
    pub fn with_options(options: Options) -> Result<Self> {
        Ok(SkipMap {
            inner: RwLock::new(SkipList::with_options(options)?),
        })
    }
}

impl<K: Ord, V> Default for SkipMap<K, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SkipMap<K, V, C> {
    /// Create an empty map ordered by `comparator`.
    ///
    /// The comparator must be a strict total order; see [`Comparator`].
    pub fn with_comparator(comparator: C) -> Self {
        SkipMap {
            inner: RwLock::new(SkipList::with_comparator(comparator)),
        }
    }

    /// Create an empty map ordered by `comparator`, rejecting out-of-range
    /// options.
    pub fn with_comparator_and_options(comparator: C, options: Options) -> Result<Self> {
        Ok(SkipMap {
            inner: RwLock::new(SkipList::with_comparator_and_options(comparator, options)?),
        })
    }

    /// Insert or overwrite. Overwriting leaves `len()` unchanged.
    pub fn put(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Remove a key. Returns whether it was present.
    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key).is_some()
    }

    /// Remove a key and hand back its value.
    pub fn take(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read_recursive().contains_key(key)
    }

    /// Visit entries with `start <= key <= end` in key order, under the
    /// read lock. Returning `false` from `visit` stops the walk.
    ///
    /// `visit` may call reading methods of the same map. It must not call a
    /// writing method (`put`, `remove`, `take`, `clear`, `shrink_to_fit`):
    /// the read lock is held for the whole walk and the write would
    /// deadlock.
    pub fn range_func<F>(&self, start: &K, end: &K, visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.inner.read_recursive().range_with(start, end, visit);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.read_recursive().len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read_recursive().is_empty()
    }

    /// Drop every entry and release the arena's memory.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Give back arena memory left over from removed entries.
    pub fn shrink_to_fit(&self) {
        self.inner.write().shrink_to_fit();
    }

    /// Number of nodes the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.inner.read_recursive().capacity()
    }

    /// Number of levels a node may use, fixed at construction.
    pub fn max_level(&self) -> usize {
        self.inner.read_recursive().max_level()
    }

    /// Per-level promotion probability, fixed at construction.
    pub fn probability(&self) -> f64 {
        self.inner.read_recursive().probability()
    }
}

impl<K, V: Clone, C: Comparator<K>> SkipMap<K, V, C> {
    /// Look up a key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.read_recursive().get(key).cloned()
    }

    /// Values with `start <= key <= end`, in key order. Empty when nothing
    /// qualifies or when `start > end`.
    pub fn range(&self, start: &K, end: &K) -> Vec<V> {
        self.inner.read_recursive().range(start, end).into_iter().cloned().collect()
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> SkipMap<K, V, C> {
    /// Smallest entry, in O(1).
    pub fn min(&self) -> Option<(K, V)> {
        let guard = self.inner.read_recursive();
        guard.first().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Largest entry, in O(log n) expected.
    pub fn max(&self) -> Option<(K, V)> {
        let guard = self.inner.read_recursive();
        guard.last().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Snapshot of every entry in key order.
    pub fn entries(&self) -> Vec<(K, V)> {
        let guard = self.inner.read_recursive();
        guard.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SkipMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read_recursive(), f)
    }
}
