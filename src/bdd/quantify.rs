use super::BddManager;
use crate::cache::SymmetricOp;
use crate::ids::{NodeId, VariableId};
use crate::primitives::Bitset;

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuantMode {
    Exists,
    Forall,
}

/// Parameters in effect for a run of [`BddManager::exists`]/[`BddManager::forall`]: which
/// variables are being quantified and whether the fold is `OR` or `AND` (§4.4).
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct QuantParams {
    mask: Bitset,
    mode: QuantMode,
}

impl BddManager {
    pub fn exists(&mut self, node: NodeId, variables: &[VariableId]) -> NodeId {
        self.quantify(node, variables, QuantMode::Exists)
    }

    pub fn forall(&mut self, node: NodeId, variables: &[VariableId]) -> NodeId {
        self.quantify(node, variables, QuantMode::Forall)
    }

    fn quantify(&mut self, node: NodeId, variables: &[VariableId], mode: QuantMode) -> NodeId {
        self.sync_caches();
        let mut mask = Bitset::new();
        for &v in variables {
            mask.set(v.as_index());
        }
        self.quant_cache.begin(QuantParams { mask: mask.clone(), mode });
        self.quantify_rec(node, &mask, mode)
    }

    fn quantify_rec(&mut self, node: NodeId, mask: &Bitset, mode: QuantMode) -> NodeId {
        if node.is_terminal() {
            return node;
        }
        if let Some(cached) = self.quant_cache.get(node) {
            return cached;
        }

        let variable = self.table.variable_of(node);
        let children = self.table.children_of(node);
        let (low, high) = (children[0], children[1]);

        self.table.push_work(node);
        let new_low = self.quantify_rec(low, mask, mode);
        self.table.push_work(new_low);
        let new_high = self.quantify_rec(high, mask, mode);
        self.table.push_work(new_high);

        let result = if mask.get(variable.as_index()) {
            let op = match mode {
                QuantMode::Exists => SymmetricOp::Or,
                QuantMode::Forall => SymmetricOp::And,
            };
            self.symmetric_rec(op, new_low, new_high)
        } else {
            self.make_node(variable, new_low, new_high)
                .expect("quantify() cannot exceed capacity right after a fresh sync")
        };
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.quant_cache.put(node, result);
        result
    }
}
