use super::MddManager;
use crate::error::Result;
use crate::ids::{NodeId, VariableId};

/// Parameters in effect for a run of [`MddManager::restrict`] (§4.4/§5).
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ComposeParams {
    variable: VariableId,
    value: u32,
}

impl MddManager {
    /// Restricts `variable` to `value`, descending past every node for `variable` by following
    /// exactly the `value`-th child (§5).
    pub fn restrict(&mut self, node: NodeId, variable: VariableId, value: u32) -> Result<NodeId> {
        self.sync_caches();
        self.compose_cache.begin(ComposeParams { variable, value });
        self.restrict_rec(node, variable, value)
    }

    fn restrict_rec(&mut self, node: NodeId, variable: VariableId, value: u32) -> Result<NodeId> {
        if node.is_terminal() {
            return Ok(node);
        }
        let node_variable = self.table.variable_of(node);
        if node_variable.as_u32() > variable.as_u32() {
            return Ok(node);
        }
        if let Some(cached) = self.compose_cache.get(node) {
            return Ok(cached);
        }

        let result = if node_variable == variable {
            let chosen = self.table.children_of(node)[value as usize];
            self.restrict_rec(chosen, variable, value)?
        } else {
            let domain = self.domains[node_variable.as_index()];
            let children: Vec<NodeId> = self.table.children_of(node).to_vec();
            self.table.push_work(node);
            let mut new_children = Vec::with_capacity(domain as usize);
            for &child in &children {
                let nc = self.restrict_rec(child, variable, value)?;
                self.table.push_work(nc);
                new_children.push(nc);
            }

            let result = self.make_node(node_variable, &new_children)?;

            for _ in 0..new_children.len() {
                self.table.pop_work();
            }
            self.table.pop_work();
            result
        };
        self.compose_cache.put(node, result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn restricting_an_equality_literal_to_its_own_value_is_true() {
        let mut m = MddManager::new(Config::default());
        let v = m.create_variable(3).unwrap();
        let eq1 = m.variable_node(v, 1).unwrap();
        assert_eq!(m.restrict(eq1, v, 1).unwrap(), NodeId::TRUE);
        assert_eq!(m.restrict(eq1, v, 0).unwrap(), NodeId::FALSE);
    }
}
