use super::BddManager;
use crate::error::Result;
use crate::ids::{NodeId, VariableId};

/// Parameters in effect for a run of [`BddManager::compose`]. The compose cache resets whenever a
/// call observes a different replacement array than the one currently cached (§4.2).
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ComposeParams {
    replacement: Vec<NodeId>,
    /// Highest variable index touched by `replacement`; nodes whose variable ranks above this can
    /// be returned unchanged without a cache lookup.
    highest_replaced: i64,
}

impl BddManager {
    /// General composition: for every variable `v` where `replacement[v]` is not
    /// [`NodeId::PLACEHOLDER`], substitutes the sub-diagram rooted at `replacement[v]` in place of
    /// `v` (§4.4).
    pub fn compose(&mut self, node: NodeId, replacement: &[NodeId]) -> Result<NodeId> {
        self.sync_caches();
        let highest_replaced = replacement
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_placeholder())
            .map(|(index, _)| index as i64)
            .max()
            .unwrap_or(-1);
        self.compose_cache.begin(ComposeParams {
            replacement: replacement.to_vec(),
            highest_replaced,
        });
        self.compose_rec(node, replacement, highest_replaced)
    }

    fn compose_rec(&mut self, node: NodeId, replacement: &[NodeId], highest_replaced: i64) -> Result<NodeId> {
        if node.is_terminal() {
            return Ok(node);
        }
        let variable = self.table.variable_of(node);
        if variable.as_u32() as i64 > highest_replaced {
            return Ok(node);
        }
        if let Some(cached) = self.compose_cache.get(node) {
            return Ok(cached);
        }

        let children = self.table.children_of(node);
        let (low, high) = (children[0], children[1]);
        self.table.push_work(node);
        let new_low = self.compose_rec(low, replacement, highest_replaced)?;
        self.table.push_work(new_low);
        let new_high = self.compose_rec(high, replacement, highest_replaced)?;
        self.table.push_work(new_high);

        let substitute = replacement
            .get(variable.as_index())
            .copied()
            .unwrap_or(NodeId::PLACEHOLDER);
        let result = if substitute.is_placeholder() {
            self.make_node(variable, new_low, new_high)?
        } else {
            self.ite_rec(substitute, new_high, new_low)
        };
        self.table.pop_work();
        self.table.pop_work();
        self.table.pop_work();
        self.compose_cache.put(node, result);
        Ok(result)
    }

    /// Restricts `variable` to `value`: a one-variable specialisation of [`BddManager::compose`]
    /// (§4.4).
    pub fn restrict(&mut self, node: NodeId, variable: VariableId, value: bool) -> Result<NodeId> {
        let mut replacement = vec![NodeId::PLACEHOLDER; self.number_of_variables() as usize];
        replacement[variable.as_index()] = NodeId::terminal(value);
        self.compose(node, &replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn restrict_true_matches_high_child() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let and_ab = m.and(a, b);
        let restricted = m.restrict(and_ab, va, true).unwrap();
        assert_eq!(restricted, b);
        let restricted_false = m.restrict(and_ab, va, false).unwrap();
        assert_eq!(restricted_false, NodeId::FALSE);
    }

    #[test]
    fn compose_with_placeholders_is_identity() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let xor_ab = m.xor(a, b);
        let replacement = vec![NodeId::PLACEHOLDER, NodeId::PLACEHOLDER];
        let composed = m.compose(xor_ab, &replacement).unwrap();
        assert_eq!(composed, xor_ab);
    }
}
