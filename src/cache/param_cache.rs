use super::DirectCache;
use crate::ids::NodeId;

/// Cache for a parameter-indexed operation family (compose/restrict, quantification). Keyed by
/// just the input node id; the parameters that give that key meaning (a replacement array, or a
/// quantified-variable set plus exists/forall tag) are remembered out-of-band and the whole cache
/// resets whenever `begin` observes different parameters than the ones currently in effect
/// (§4.2's "parameter record").
pub(crate) struct ParamCache<P> {
    inner: DirectCache<NodeId, NodeId>,
    params: Option<P>,
}

impl<P: PartialEq> ParamCache<P> {
    pub fn new(divider: usize) -> ParamCache<P> {
        ParamCache {
            inner: DirectCache::new(divider),
            params: None,
        }
    }

    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        self.inner.sync(table_capacity, table_generation);
    }

    /// Resets the cache if `params` differs from the parameters currently in effect. Returns
    /// `true` if a reset happened.
    pub fn begin(&mut self, params: P) -> bool {
        let reset = match &self.params {
            Some(current) if *current == params => false,
            _ => true,
        };
        if reset {
            self.inner.clear();
            self.params = Some(params);
            log::debug!("parameter cache reset (parameters changed)");
        }
        reset
    }

    pub fn get(&mut self, node: NodeId) -> Option<NodeId> {
        self.inner.get(&node)
    }

    pub fn put(&mut self, node: NodeId, result: NodeId) {
        self.inner.put(node, result);
    }
}
