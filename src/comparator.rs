use std::cmp::Ordering;

/// A three-way comparison defining the key order of a skip list.
///
/// Implementations must be a strict total order: consistent, transitive,
/// and with every pair of keys comparable. Keys that compare `Equal` are
/// the same key, so a put of one overwrites the other. An inconsistent
/// comparator does not panic; it silently breaks the level ordering and
/// lookups stop finding keys that are present.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator:
///
/// ```
/// use skipmap::SkipMap;
///
/// // Descending order.
/// let map = SkipMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.put(1, "one");
/// map.put(2, "two");
/// assert_eq!(map.min(), Some((2, "two")));
/// ```
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
