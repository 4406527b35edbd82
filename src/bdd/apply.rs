use super::BddManager;
use crate::cache::SymmetricOp;
use crate::ids::{NodeId, VariableId};

impl BddManager {
    /// Cofactor of `node` with respect to `variable`: the child reached by fixing `variable` to
    /// `high`, or `node` itself if `variable` does not appear above it (§4.3).
    pub(super) fn cofactor(&self, node: NodeId, variable: VariableId, high: bool) -> NodeId {
        if node.is_terminal() || self.table.variable_of(node) != variable {
            return node;
        }
        let children = self.table.children_of(node);
        if high {
            children[1]
        } else {
            children[0]
        }
    }

    /// Recursive form of negation. The iterative form in `apply_iter.rs` is the default entry
    /// point; this one is kept so the two can be checked against each other.
    pub fn not_recursive(&mut self, node: NodeId) -> NodeId {
        self.sync_caches();
        self.not_rec(node)
    }

    pub(super) fn not_rec(&mut self, node: NodeId) -> NodeId {
        if node.is_false() {
            return NodeId::TRUE;
        }
        if node.is_true() {
            return NodeId::FALSE;
        }
        if let Some(cached) = self.negation_cache.get(node) {
            return cached;
        }
        let variable = self.table.variable_of(node);
        let children = self.table.children_of(node);
        let (low, high) = (children[0], children[1]);

        self.table.push_work(node);
        let new_low = self.not_rec(low);
        self.table.push_work(new_low);
        let new_high = self.not_rec(high);
        self.table.push_work(new_high);

        let result = self
            .make_node(variable, new_low, new_high)
            .expect("not() cannot exceed capacity right after a fresh sync");
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.negation_cache.put(node, result);
        result
    }

    pub fn and_recursive(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::And, a, b)
    }

    pub fn or_recursive(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Or, a, b)
    }

    pub fn xor_recursive(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Xor, a, b)
    }

    pub fn nand_recursive(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Nand, a, b)
    }

    pub fn equiv_recursive(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Equiv, a, b)
    }

    /// Every terminal short-circuit for a symmetric binary operator, checked exhaustively before
    /// falling back to Shannon expansion (§4.3).
    pub(super) fn symmetric_terminal_shortcut(&mut self, op: SymmetricOp, a: NodeId, b: NodeId) -> Option<NodeId> {
        use SymmetricOp::*;
        match op {
            And => {
                if a.is_false() || b.is_false() {
                    return Some(NodeId::FALSE);
                }
                if a.is_true() {
                    return Some(b);
                }
                if b.is_true() {
                    return Some(a);
                }
                if a == b {
                    return Some(a);
                }
            }
            Or => {
                if a.is_true() || b.is_true() {
                    return Some(NodeId::TRUE);
                }
                if a.is_false() {
                    return Some(b);
                }
                if b.is_false() {
                    return Some(a);
                }
                if a == b {
                    return Some(a);
                }
            }
            Xor => {
                if a == b {
                    return Some(NodeId::FALSE);
                }
                if a.is_false() {
                    return Some(b);
                }
                if b.is_false() {
                    return Some(a);
                }
                if a.is_true() {
                    return Some(self.not_rec(b));
                }
                if b.is_true() {
                    return Some(self.not_rec(a));
                }
            }
            Nand => {
                if a.is_false() || b.is_false() {
                    return Some(NodeId::TRUE);
                }
                if a.is_true() {
                    return Some(self.not_rec(b));
                }
                if b.is_true() {
                    return Some(self.not_rec(a));
                }
                if a == b {
                    return Some(self.not_rec(a));
                }
            }
            Equiv => {
                if a == b {
                    return Some(NodeId::TRUE);
                }
                if a.is_true() {
                    return Some(b);
                }
                if b.is_true() {
                    return Some(a);
                }
                if a.is_false() {
                    return Some(self.not_rec(b));
                }
                if b.is_false() {
                    return Some(self.not_rec(a));
                }
            }
        }
        None
    }

    pub(super) fn symmetric_rec(&mut self, op: SymmetricOp, a: NodeId, b: NodeId) -> NodeId {
        if let Some(result) = self.symmetric_terminal_shortcut(op, a, b) {
            return result;
        }
        let (key_a, key_b) = if a <= b { (a, b) } else { (b, a) };
        if let Some(cached) = self.symmetric_cache.get(op, key_a, key_b) {
            return cached;
        }

        let top = self.variable_rank(a).min(self.variable_rank(b));
        let a_low = self.cofactor(a, top, false);
        let a_high = self.cofactor(a, top, true);
        let b_low = self.cofactor(b, top, false);
        let b_high = self.cofactor(b, top, true);

        self.table.push_work(a);
        self.table.push_work(b);
        let low = self.symmetric_rec(op, a_low, b_low);
        self.table.push_work(low);
        let high = self.symmetric_rec(op, a_high, b_high);
        self.table.push_work(high);

        let result = self
            .make_node(top, low, high)
            .expect("symmetric apply cannot exceed capacity right after a fresh sync");
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.symmetric_cache.put(op, key_a, key_b, result);
        result
    }

    pub fn ite_recursive(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        self.sync_caches();
        self.ite_rec(f, g, h)
    }

    pub(super) fn ite_rec(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        if f.is_true() {
            return g;
        }
        if f.is_false() {
            return h;
        }
        if g == h {
            return g;
        }
        if g.is_true() && h.is_false() {
            return f;
        }
        if g.is_false() && h.is_true() {
            return self.not_rec(f);
        }
        if let Some(cached) = self.ite_cache.get(f, g, h) {
            return cached;
        }

        let top = self
            .variable_rank(f)
            .min(self.variable_rank(g))
            .min(self.variable_rank(h));
        let f_low = self.cofactor(f, top, false);
        let f_high = self.cofactor(f, top, true);
        let g_low = self.cofactor(g, top, false);
        let g_high = self.cofactor(g, top, true);
        let h_low = self.cofactor(h, top, false);
        let h_high = self.cofactor(h, top, true);

        self.table.push_work(f);
        self.table.push_work(g);
        self.table.push_work(h);
        let low = self.ite_rec(f_low, g_low, h_low);
        self.table.push_work(low);
        let high = self.ite_rec(f_high, g_high, h_high);
        self.table.push_work(high);

        let result = self
            .make_node(top, low, high)
            .expect("ite() cannot exceed capacity right after a fresh sync");
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.ite_cache.put(f, g, h, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn manager() -> BddManager {
        BddManager::new(Config::default())
    }

    #[test]
    fn and_or_terminal_shortcuts() {
        let mut m = manager();
        let v = m.create_variable();
        let x = m.variable_node(v).unwrap();
        assert_eq!(m.and_recursive(x, NodeId::TRUE), x);
        assert_eq!(m.and_recursive(x, NodeId::FALSE), NodeId::FALSE);
        assert_eq!(m.or_recursive(x, NodeId::TRUE), NodeId::TRUE);
        assert_eq!(m.or_recursive(x, NodeId::FALSE), x);
    }

    #[test]
    fn not_is_involutive() {
        let mut m = manager();
        let v = m.create_variable();
        let x = m.variable_node(v).unwrap();
        let nx = m.not_recursive(x);
        assert_eq!(m.not_recursive(nx), x);
    }

    #[test]
    fn xor_self_is_false() {
        let mut m = manager();
        let v = m.create_variable();
        let x = m.variable_node(v).unwrap();
        assert_eq!(m.xor_recursive(x, x), NodeId::FALSE);
    }

    #[test]
    fn ite_reduces_to_and_or() {
        let mut m = manager();
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let ite_as_and = m.ite_recursive(a, b, NodeId::FALSE);
        let and = m.and_recursive(a, b);
        assert_eq!(ite_as_and, and);
    }
}
