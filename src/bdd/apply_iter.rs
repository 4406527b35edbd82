use super::BddManager;
use crate::cache::SymmetricOp;
use crate::ids::{NodeId, VariableId};

/// Explicit-stack equivalents of the recursive apply algorithms in `apply.rs`. These are the
/// default entry points (`and`, `or`, `xor`, `nand`, `equiv`, `not`, `ite`) so that callers are not
/// bound by Rust's call stack depth on deep diagrams; the `_recursive` siblings in `apply.rs`
/// exist so the two can be checked against each other in tests. Every function here must return
/// the same node id as its recursive counterpart for any input.
enum NotTask {
    Enter(NodeId),
    Exit(NodeId, VariableId),
}

enum SymTask {
    Enter(SymmetricOp, NodeId, NodeId),
    /// `key_a`/`key_b` are the canonical (sorted) cache key for this pair; `top` is the variable
    /// chosen for the Shannon expansion.
    Exit(SymmetricOp, NodeId, NodeId, VariableId),
}

enum IteTask {
    Enter(NodeId, NodeId, NodeId),
    Exit(NodeId, NodeId, NodeId, VariableId),
}

impl BddManager {
    /// Default entry point for negation: explicit-stack so callers are not bound by Rust's call
    /// stack depth on deep diagrams. See `apply.rs::not_recursive` for the recursive twin.
    pub fn not(&mut self, node: NodeId) -> NodeId {
        self.sync_caches();
        self.not_iter(node)
    }

    pub(super) fn not_iter(&mut self, node: NodeId) -> NodeId {
        let mut tasks = vec![NotTask::Enter(node)];
        let mut results = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                NotTask::Enter(n) => {
                    if n.is_false() {
                        results.push(NodeId::TRUE);
                        continue;
                    }
                    if n.is_true() {
                        results.push(NodeId::FALSE);
                        continue;
                    }
                    if let Some(cached) = self.negation_cache.get(n) {
                        results.push(cached);
                        continue;
                    }
                    let variable = self.table.variable_of(n);
                    let children = self.table.children_of(n);
                    let (low, high) = (children[0], children[1]);
                    self.table.push_work(n);
                    tasks.push(NotTask::Exit(n, variable));
                    tasks.push(NotTask::Enter(high));
                    tasks.push(NotTask::Enter(low));
                }
                NotTask::Exit(n, variable) => {
                    let new_high = results.pop().expect("not_iterative: missing high result");
                    let new_low = results.pop().expect("not_iterative: missing low result");
                    self.table.push_work(new_low);
                    self.table.push_work(new_high);
                    let result = self
                        .make_node(variable, new_low, new_high)
                        .expect("not_iterative cannot exceed capacity right after a fresh sync");
                    self.table.pop_work();
                    self.table.pop_work();
                    self.table.pop_work();
                    self.negation_cache.put(n, result);
                    results.push(result);
                }
            }
        }

        results.pop().expect("not_iterative left no result on the stack")
    }

    pub fn and(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_iter(SymmetricOp::And, a, b)
    }

    pub fn or(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_iter(SymmetricOp::Or, a, b)
    }

    pub fn xor(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_iter(SymmetricOp::Xor, a, b)
    }

    pub fn nand(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_iter(SymmetricOp::Nand, a, b)
    }

    pub fn equiv(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.sync_caches();
        self.symmetric_iter(SymmetricOp::Equiv, a, b)
    }

    fn symmetric_iter(&mut self, op: SymmetricOp, a0: NodeId, b0: NodeId) -> NodeId {
        let mut tasks = vec![SymTask::Enter(op, a0, b0)];
        let mut results = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                SymTask::Enter(op, a, b) => {
                    if let Some(result) = self.symmetric_terminal_shortcut(op, a, b) {
                        results.push(result);
                        continue;
                    }
                    let (key_a, key_b) = if a <= b { (a, b) } else { (b, a) };
                    if let Some(cached) = self.symmetric_cache.get(op, key_a, key_b) {
                        results.push(cached);
                        continue;
                    }

                    let top = self.variable_rank(a).min(self.variable_rank(b));
                    let a_low = self.cofactor(a, top, false);
                    let a_high = self.cofactor(a, top, true);
                    let b_low = self.cofactor(b, top, false);
                    let b_high = self.cofactor(b, top, true);

                    self.table.push_work(a);
                    self.table.push_work(b);
                    tasks.push(SymTask::Exit(op, key_a, key_b, top));
                    tasks.push(SymTask::Enter(op, a_high, b_high));
                    tasks.push(SymTask::Enter(op, a_low, b_low));
                }
                SymTask::Exit(op, key_a, key_b, top) => {
                    let high = results.pop().expect("symmetric apply: missing high result");
                    let low = results.pop().expect("symmetric apply: missing low result");
                    self.table.push_work(low);
                    self.table.push_work(high);
                    let result = self
                        .make_node(top, low, high)
                        .expect("symmetric apply (iterative) cannot exceed capacity right after a fresh sync");
                    self.table.pop_work();
                    self.table.pop_work();
                    self.table.pop_work();
                    self.table.pop_work();
                    self.symmetric_cache.put(op, key_a, key_b, result);
                    results.push(result);
                }
            }
        }

        results.pop().expect("symmetric apply (iterative) left no result on the stack")
    }

    pub fn ite(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        self.sync_caches();
        self.ite_iter(f, g, h)
    }

    fn ite_iter(&mut self, f0: NodeId, g0: NodeId, h0: NodeId) -> NodeId {
        let mut tasks = vec![IteTask::Enter(f0, g0, h0)];
        let mut results = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                IteTask::Enter(f, g, h) => {
                    if f.is_true() {
                        results.push(g);
                        continue;
                    }
                    if f.is_false() {
                        results.push(h);
                        continue;
                    }
                    if g == h {
                        results.push(g);
                        continue;
                    }
                    if g.is_true() && h.is_false() {
                        results.push(f);
                        continue;
                    }
                    if g.is_false() && h.is_true() {
                        results.push(self.not_iter(f));
                        continue;
                    }
                    if let Some(cached) = self.ite_cache.get(f, g, h) {
                        results.push(cached);
                        continue;
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
                    tasks.push(IteTask::Exit(f, g, h, top));
                    tasks.push(IteTask::Enter(f_high, g_high, h_high));
                    tasks.push(IteTask::Enter(f_low, g_low, h_low));
                }
                IteTask::Exit(f, g, h, top) => {
                    let high = results.pop().expect("ite: missing high result");
                    let low = results.pop().expect("ite: missing low result");
                    self.table.push_work(low);
                    self.table.push_work(high);
                    let result = self
                        .make_node(top, low, high)
                        .expect("ite (iterative) cannot exceed capacity right after a fresh sync");
                    self.table.pop_work();
                    self.table.pop_work();
                    self.table.pop_work();
                    self.table.pop_work();
                    self.table.pop_work();
                    self.ite_cache.put(f, g, h, result);
                    results.push(result);
                }
            }
        }

        results.pop().expect("ite (iterative) left no result on the stack")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn iterative_and_matches_recursive_and() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let vc = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let c = m.variable_node(vc).unwrap();
        let ab = m.and(a, b);
        let formula = m.or(ab, c);

        let recursive = m.and_recursive(formula, c);
        let iterative = m.and(formula, c);
        assert_eq!(recursive, iterative);
    }

    #[test]
    fn iterative_ite_matches_recursive_ite() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let vc = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let c = m.variable_node(vc).unwrap();

        let recursive = m.ite_recursive(a, b, c);
        let iterative = m.ite(a, b, c);
        assert_eq!(recursive, iterative);
    }

    #[test]
    fn iterative_not_matches_recursive_not() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let formula = m.xor(a, b);

        let recursive = m.not_recursive(formula);
        let iterative = m.not(formula);
        assert_eq!(recursive, iterative);
    }
}
