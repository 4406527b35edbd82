use super::DirectCache;
use crate::ids::NodeId;

/// The negation cache: `NOT` has its own single-operand cache (§4.3).
pub(crate) struct UnaryCache {
    inner: DirectCache<NodeId, NodeId>,
}

impl UnaryCache {
    pub fn new(divider: usize) -> UnaryCache {
        UnaryCache {
            inner: DirectCache::new(divider),
        }
    }

    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        self.inner.sync(table_capacity, table_generation);
    }

    pub fn get(&mut self, node: NodeId) -> Option<NodeId> {
        self.inner.get(&node)
    }

    pub fn put(&mut self, node: NodeId, result: NodeId) {
        self.inner.put(node, result);
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }
}
