//! # SkipMap
//!
//! A concurrent ordered map built on a probabilistic skip list.
//!
//! ## Core idea
//! A sorted linked list is cheap to iterate but slow to search. A skip
//! list stacks extra "express lane" lists on top of it, each holding
//! roughly half the nodes of the lane below, so a search drops from lane
//! to lane and touches O(log n) nodes on average. No rebalancing is ever
//! needed: the shape comes from coin flips at insertion time.
//!
//! [`SkipList`] is the single-threaded engine. [`SkipMap`] wraps it in one
//! reader/writer lock so every operation sees a consistent state.
//!
//! ```
//! use skipmap::SkipMap;
//!
//! let map = SkipMap::new();
//! map.put(3, "c");
//! map.put(1, "a");
//! map.put(2, "b");
//!
//! assert_eq!(map.range(&2, &3), vec!["b", "c"]);
//! assert_eq!(map.min(), Some((1, "a")));
//! ```

pub mod comparator;
pub mod error;
pub mod options;
pub mod skipmap;

// Public re-exports for the top-level API
pub use comparator::{Comparator, Natural};
pub use error::{Error, Result};
pub use options::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, Options};
pub use skipmap::SkipMap;
pub use skipmap::skiplist::{Iter, SkipList};
