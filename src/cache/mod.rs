//! C3: the fixed-size, hash-indexed operation caches.

mod binary;
mod param_cache;
mod sat_count;
mod ternary;
mod unary;

pub(crate) use binary::{AsymmetricBinaryCache, SymmetricBinaryCache};
pub(crate) use param_cache::ParamCache;
pub(crate) use sat_count::SatCountCache;
pub(crate) use ternary::TernaryCache;
pub(crate) use unary::UnaryCache;

use crate::ids::NodeId;
use crate::primitives::{mix2, mix3, mix4, next_prime};

/// Anything that can be reduced to a cache bucket index.
pub(crate) trait CacheKey: Copy + Eq {
    fn cache_hash(&self) -> u64;
}

impl CacheKey for NodeId {
    fn cache_hash(&self) -> u64 {
        self.as_u64()
    }
}

impl CacheKey for (NodeId, NodeId) {
    fn cache_hash(&self) -> u64 {
        mix2(self.0.as_u64(), self.1.as_u64())
    }
}

impl CacheKey for (u8, NodeId, NodeId) {
    fn cache_hash(&self) -> u64 {
        mix3(self.0 as u64, self.1.as_u64(), self.2.as_u64())
    }
}

impl CacheKey for (NodeId, NodeId, NodeId) {
    fn cache_hash(&self) -> u64 {
        mix3(self.0.as_u64(), self.1.as_u64(), self.2.as_u64())
    }
}

impl CacheKey for (u8, NodeId, NodeId, NodeId) {
    fn cache_hash(&self) -> u64 {
        mix4(self.0 as u64, self.1.as_u64(), self.2.as_u64(), self.3.as_u64())
    }
}

/// A single fixed-size, direct-indexed cache shared by every operation family (§4.2/§4.3):
/// collisions replace (no chaining), the slot count is `next_prime(table_size / divider)`, and
/// the whole cache is invalidated (cleared + regenerated) on GC/growth by comparing generation
/// counters.
pub(crate) struct DirectCache<K, V> {
    slots: Vec<Option<(K, V)>>,
    divider: usize,
    built_at_generation: u64,
    hits: u64,
    misses: u64,
}

impl<K: CacheKey, V: Clone> DirectCache<K, V> {
    pub fn new(divider: usize) -> DirectCache<K, V> {
        DirectCache {
            slots: Vec::new(),
            divider,
            built_at_generation: u64::MAX,
            hits: 0,
            misses: 0,
        }
    }

    /// Resizes and clears the cache if the table's generation has moved since this cache was
    /// last built for the given table size.
    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        if self.built_at_generation == table_generation && !self.slots.is_empty() {
            return;
        }
        let slot_count = next_prime((table_capacity / self.divider).max(1));
        self.slots = vec![None; slot_count];
        self.built_at_generation = table_generation;
    }

    #[inline]
    fn index(&self, key: &K) -> usize {
        (key.cache_hash() % self.slots.len() as u64) as usize
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        let index = self.index(key);
        match &self.slots[index] {
            Some((k, v)) if k == key => {
                self.hits += 1;
                Some(v.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        let index = self.index(&key);
        self.slots[index] = Some((key, value));
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        occupied as f64 / self.slots.len() as f64
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
