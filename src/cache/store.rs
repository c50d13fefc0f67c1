//! Fixed-capacity cache with least-recently-used eviction
//!
//! The lookup map and the recency list always describe the same key set:
//! every cached key owns exactly one slot in the arena, and that slot is
//! linked into the recency list exactly once. Recency updates detach and
//! reattach a slot by index, so `get`, `put`, and eviction are all O(1).

use crate::cache::types::CacheStats;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// One arena slot: the entry plus its links in the recency list
struct Slot<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity LRU cache, generic over key and value
///
/// Not internally synchronized: callers mutate it from a single task. The
/// serving pipeline owns both instances and is driven one request at a time,
/// so no lock is needed.
pub struct LruCache<K, V> {
    capacity: usize,
    index: HashMap<K, usize>,
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<usize>,
    /// Most recently used slot
    head: Option<usize>,
    /// Least recently used slot
    tail: Option<usize>,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries
    ///
    /// Capacity 0 is legal and degenerate: every `put` is dropped
    /// immediately and every `get` misses.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            stats: CacheStats::default(),
        }
    }

    /// Look up a key, refreshing its recency on a hit
    ///
    /// Accepts any borrowed form of the key, so a `String`-keyed cache can
    /// be queried with `&str` without allocating.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.stats.misses += 1;
                return None;
            }
        };

        self.stats.hits += 1;
        self.move_to_front(idx);
        self.slots[idx].as_ref().map(|slot| slot.value.clone())
    }

    /// Insert or update an entry, evicting the LRU entry if at capacity
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(slot) = self.slots[idx].as_mut() {
                slot.value = value;
            }
            self.move_to_front(idx);
            return;
        }

        if self.capacity == 0 {
            self.stats.evictions += 1;
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let slot = Slot {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            if let Some(s) = self.slots[old_head].as_mut() {
                s.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.index.insert(key, idx);
    }

    /// Number of entries currently cached
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of hit/miss/eviction counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.index.len(),
            ..self.stats.clone()
        }
    }

    /// Detach a slot from the recency list
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(s) = self.slots[p].as_mut() {
                    s.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(s) = self.slots[n].as_mut() {
                    s.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = None;
            slot.next = None;
        }
    }

    /// Move a slot to the most-recently-used position
    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(slot) = self.slots[idx].as_mut() {
            slot.next = self.head;
        }
        if let Some(old_head) = self.head {
            if let Some(s) = self.slots[old_head].as_mut() {
                s.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    /// Remove the least-recently-used entry
    fn evict_lru(&mut self) {
        let Some(idx) = self.tail else {
            return;
        };

        self.unlink(idx);
        if let Some(slot) = self.slots[idx].take() {
            self.index.remove(&slot.key);
        }
        self.free.push(idx);
        self.stats.evictions += 1;

        debug!("Evicted LRU entry ({} entries cached)", self.index.len());
    }
}
