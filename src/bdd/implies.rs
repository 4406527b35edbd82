use super::BddManager;
use crate::ids::NodeId;

impl BddManager {
    /// Constructive implication: builds the diagram for `a => b`, reusing the dedicated
    /// implication cache (§4.3). `IMPLICATION` is not commutative, so unlike the symmetric
    /// operators its cache key is not canonicalised.
    pub fn implication(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.implies_rec(a, b)
    }

    fn implies_rec(&mut self, a: NodeId, b: NodeId) -> NodeId {
        if a.is_false() || b.is_true() {
            return NodeId::TRUE;
        }
        if a.is_true() {
            return b;
        }
        if b.is_false() {
            return self.not_rec(a);
        }
        if a == b {
            return NodeId::TRUE;
        }
        if let Some(cached) = self.implies_cache.get(a, b) {
            return cached;
        }

        let top = self.variable_rank(a).min(self.variable_rank(b));
        let a_low = self.cofactor(a, top, false);
        let a_high = self.cofactor(a, top, true);
        let b_low = self.cofactor(b, top, false);
        let b_high = self.cofactor(b, top, true);

        self.table.push_work(a);
        self.table.push_work(b);
        let low = self.implies_rec(a_low, b_low);
        self.table.push_work(low);
        let high = self.implies_rec(a_high, b_high);
        self.table.push_work(high);

        let result = self
            .make_node(top, low, high)
            .expect("implication() cannot exceed capacity right after a fresh sync");
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.implies_cache.put(a, b, result);
        result
    }

    /// Predicate form of implication: decides whether `a => b` holds for every assignment without
    /// materialising the result diagram. Opportunistically reuses entries left behind by
    /// [`BddManager::implication`] but never populates the cache itself, since it has no node to
    /// store.
    pub fn implies(&mut self, a: NodeId, b: NodeId) -> bool {
        self.sync_caches();
        self.implies_holds_rec(a, b)
    }

    fn implies_holds_rec(&mut self, a: NodeId, b: NodeId) -> bool {
        if a.is_false() || b.is_true() {
            return true;
        }
        if a.is_true() {
            return b.is_true();
        }
        if b.is_false() {
            return a.is_false();
        }
        if a == b {
            return true;
        }
        if let Some(cached) = self.implies_cache.get(a, b) {
            return cached.is_true();
        }

        let top = self.variable_rank(a).min(self.variable_rank(b));
        let a_low = self.cofactor(a, top, false);
        let a_high = self.cofactor(a, top, true);
        let b_low = self.cofactor(b, top, false);
        let b_high = self.cofactor(b, top, true);
        self.implies_holds_rec(a_low, b_low) && self.implies_holds_rec(a_high, b_high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn implication_matches_or_not_a_b() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let constructive = m.implication(a, b);
        let not_a = m.not(a);
        let via_or = m.or(not_a, b);
        assert_eq!(constructive, via_or);
    }

    #[test]
    fn implies_agrees_with_constructive_result() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let a = m.variable_node(va).unwrap();
        assert!(m.implies(NodeId::FALSE, a));
        assert!(!m.implies(a, NodeId::FALSE));
        assert!(m.implies(a, a));
    }
}
