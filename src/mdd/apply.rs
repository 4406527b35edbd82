use super::MddManager;
use crate::cache::SymmetricOp;
use crate::ids::{NodeId, VariableId};

impl MddManager {
    /// Cofactor of `node` with respect to `variable == value`, generalising the binary
    /// low/high split to `domain(variable)`-many branches (§5).
    pub(super) fn cofactor(&self, node: NodeId, variable: VariableId, value: u32) -> NodeId {
        if node.is_terminal() || self.table.variable_of(node) != variable {
            return node;
        }
        self.table.children_of(node)[value as usize]
    }

    pub fn not(&mut self, node: NodeId) -> NodeId {
        self.sync_caches();
        self.not_rec(node)
    }

    fn not_rec(&mut self, node: NodeId) -> NodeId {
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
        let domain = self.domains[variable.as_index()];
        let children: Vec<NodeId> = (0..domain).map(|k| self.cofactor(node, variable, k)).collect();

        self.table.push_work(node);
        let mut new_children = Vec::with_capacity(children.len());
        for &c in &children {
            let nc = self.not_rec(c);
            self.table.push_work(nc);
            new_children.push(nc);
        }

        let result = self
            .make_node(variable, &new_children)
            .expect("not() cannot exceed capacity right after a fresh sync");

        for _ in 0..new_children.len() {
            self.table.pop_work();
        }
        self.table.pop_work();
        self.negation_cache.put(node, result);
        result
    }

    pub fn and(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::And, a, b)
    }

    pub fn or(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Or, a, b)
    }

    pub fn xor(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Xor, a, b)
    }

    pub fn nand(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Nand, a, b)
    }

    pub fn equiv(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_rec(SymmetricOp::Equiv, a, b)
    }

    fn symmetric_terminal_shortcut(&mut self, op: SymmetricOp, a: NodeId, b: NodeId) -> Option<NodeId> {
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

    fn symmetric_rec(&mut self, op: SymmetricOp, a: NodeId, b: NodeId) -> NodeId {
        if let Some(result) = self.symmetric_terminal_shortcut(op, a, b) {
            return result;
        }
        let (key_a, key_b) = if a <= b { (a, b) } else { (b, a) };
        if let Some(cached) = self.symmetric_cache.get(op, key_a, key_b) {
            return cached;
        }

        let top = self.variable_rank(a).min(self.variable_rank(b));
        let domain = self.domains[top.as_index()];

        self.table.push_work(a);
        self.table.push_work(b);
        let mut children = Vec::with_capacity(domain as usize);
        for value in 0..domain {
            let a_value = self.cofactor(a, top, value);
            let b_value = self.cofactor(b, top, value);
            let child = self.symmetric_rec(op, a_value, b_value);
            self.table.push_work(child);
            children.push(child);
        }

        let result = self
            .make_node(top, &children)
            .expect("symmetric apply cannot exceed capacity right after a fresh sync");

        for _ in 0..children.len() {
            self.table.pop_work();
        }
        self.table.pop_work();
        self.table.pop_work();
        self.symmetric_cache.put(op, key_a, key_b, result);
        result
    }

    pub fn ite(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        self.sync_caches();
        self.ite_rec(f, g, h)
    }

    fn ite_rec(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        if f.is_true() {
            return g;
        }
        if f.is_false() {
            return h;
        }
        if g == h {
            return g;
        }
        if let Some(cached) = self.ite_cache.get(f, g, h) {
            return cached;
        }

        let top = self
            .variable_rank(f)
            .min(self.variable_rank(g))
            .min(self.variable_rank(h));
        let domain = self.domains[top.as_index()];

        self.table.push_work(f);
        self.table.push_work(g);
        self.table.push_work(h);
        let mut children = Vec::with_capacity(domain as usize);
        for value in 0..domain {
            let f_value = self.cofactor(f, top, value);
            let g_value = self.cofactor(g, top, value);
            let h_value = self.cofactor(h, top, value);
            let child = self.ite_rec(f_value, g_value, h_value);
            self.table.push_work(child);
            children.push(child);
        }

        let result = self
            .make_node(top, &children)
            .expect("ite() cannot exceed capacity right after a fresh sync");

        for _ in 0..children.len() {
            self.table.pop_work();
        }
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.ite_cache.put(f, g, h, result);
        result
    }
}
