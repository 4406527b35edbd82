use super::DirectCache;
use crate::ids::NodeId;

/// Cache for the ternary if-then-else operator, keyed by `(f, g, h)` (§4.3).
pub(crate) struct TernaryCache {
    inner: DirectCache<(NodeId, NodeId, NodeId), NodeId>,
}

impl TernaryCache {
    pub fn new(divider: usize) -> TernaryCache {
        TernaryCache {
            inner: DirectCache::new(divider),
        }
    }

    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        self.inner.sync(table_capacity, table_generation);
    }

    pub fn get(&mut self, f: NodeId, g: NodeId, h: NodeId) -> Option<NodeId> {
        self.inner.get(&(f, g, h))
    }

    pub fn put(&mut self, f: NodeId, g: NodeId, h: NodeId, result: NodeId) {
        self.inner.put((f, g, h), result);
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }
}
