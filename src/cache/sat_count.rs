use crate::ids::NodeId;
use crate::primitives::next_prime;
use num_bigint::BigUint;

/// Satisfaction-count cache: node id → arbitrary-precision count (§4.5 "counting"). Kept separate
/// from `DirectCache` because `BigUint` is not `Copy`, which would make the generic cache's
/// clone-on-hit behaviour wasteful; entries are returned by reference instead.
pub(crate) struct SatCountCache {
    slots: Vec<Option<(NodeId, BigUint)>>,
    divider: usize,
    built_at_generation: u64,
}

impl SatCountCache {
    pub fn new(divider: usize) -> SatCountCache {
        SatCountCache {
            slots: Vec::new(),
            divider,
            built_at_generation: u64::MAX,
        }
    }

    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        if self.built_at_generation == table_generation && !self.slots.is_empty() {
            return;
        }
        let slot_count = next_prime((table_capacity / self.divider).max(1));
        self.slots = (0..slot_count).map(|_| None).collect();
        self.built_at_generation = table_generation;
    }

    #[inline]
    fn index(&self, node: NodeId) -> usize {
        (node.as_u64() % self.slots.len() as u64) as usize
    }

    pub fn get(&self, node: NodeId) -> Option<&BigUint> {
        match &self.slots[self.index(node)] {
            Some((k, v)) if *k == node => Some(v),
            _ => None,
        }
    }

    pub fn put(&mut self, node: NodeId, count: BigUint) {
        let index = self.index(node);
        self.slots[index] = Some((node, count));
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
