// SkipMap concurrent access: one RwLock serializes writers against readers.

use std::sync::{Arc, Barrier};
use std::thread;

use skipmap::SkipMap;

const THREADS: usize = 16;
const PER_THREAD: usize = 200;

// =============================================================================
// Test 1: Concurrent distinct-key puts all land
// =============================================================================
#[test]
fn concurrent_puts_then_gets() {
    let map = Arc::new(SkipMap::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..PER_THREAD {
                    let key = t * PER_THREAD + j;
                    map.put(key, format!("val{key}"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(map.len(), THREADS * PER_THREAD);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for j in 0..PER_THREAD {
                    let key = t * PER_THREAD + j;
                    assert_eq!(map.get(&key), Some(format!("val{key}")));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

// =============================================================================
// Test 2: Concurrent removes
// =============================================================================
#[test]
fn concurrent_removes_empty_the_map() {
    let map = Arc::new(SkipMap::new());
    for key in 0..THREADS * PER_THREAD {
        map.put(key, key);
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for j in 0..PER_THREAD {
                    assert!(map.remove(&(t * PER_THREAD + j)));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert!(map.is_empty());
    assert_eq!(map.min(), None);
}

// =============================================================================
// Test 3: Readers always see a sorted, consistent view during writes
// =============================================================================
#[test]
fn readers_see_consistent_snapshots() {
    let map = Arc::new(SkipMap::new());

    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for i in 0..2000u32 {
                map.put(i, i);
                if i % 3 == 0 {
                    map.remove(&(i / 2));
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = map.entries();
                    assert!(snapshot.windows(2).all(|w| w[0].0 < w[1].0));
                    assert!(snapshot.iter().all(|(k, v)| k == v));

                    let mut last = None;
                    map.range_func(&0, &u32::MAX, |k, _| {
                        assert!(last.is_none_or(|prev| prev < *k));
                        last = Some(*k);
                        true
                    });
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    // Final state matches a sequential replay.
    let mut expected = std::collections::BTreeMap::new();
    for i in 0..2000u32 {
        expected.insert(i, i);
        if i % 3 == 0 {
            expected.remove(&(i / 2));
        }
    }
    assert_eq!(map.entries(), expected.into_iter().collect::<Vec<_>>());
}

// =============================================================================
// Test 4: Overlapping puts on the same keys
// =============================================================================
#[test]
fn contended_overwrites_keep_keys_unique() {
    let map = Arc::new(SkipMap::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for key in 0..50 {
                    map.put(key, t);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(map.len(), 50);
    for (_, writer) in map.entries() {
        assert!(writer < THREADS);
    }
}
