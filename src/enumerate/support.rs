use crate::bdd::BddManager;
use crate::ids::NodeId;
use crate::primitives::Bitset;

/// Full variable support of `node`: a mark-bit DFS over the node table, followed implicitly by
/// discarding the mark scratch space (§4.5).
pub(crate) fn support(manager: &mut BddManager, node: NodeId) -> Bitset {
    let mut visited = vec![false; manager.table.capacity()];
    let mut result = Bitset::new();
    support_rec(manager, node, &mut visited, &mut result);
    result
}

fn support_rec(manager: &BddManager, node: NodeId, visited: &mut [bool], result: &mut Bitset) {
    if node.is_terminal() {
        return;
    }
    let index = node.as_index();
    if visited[index] {
        return;
    }
    visited[index] = true;

    let variable = manager.table.variable_of(node);
    result.set(variable.as_index());
    let children = manager.table.children_of(node);
    let (low, high) = (children[0], children[1]);
    support_rec(manager, low, visited, result);
    support_rec(manager, high, visited, result);
}

/// Support restricted to (and computed only with respect to) the variables set in `mask`,
/// pruning the DFS once every candidate variable has been found (§4.5).
pub(crate) fn support_filtered(manager: &mut BddManager, node: NodeId, mask: &Bitset) -> Bitset {
    let mut visited = vec![false; manager.table.capacity()];
    let mut remaining: Vec<usize> = mask.iter_set().collect();
    let mut result = Bitset::new();
    support_filtered_rec(manager, node, &mut visited, &mut remaining, &mut result);
    result
}

fn support_filtered_rec(
    manager: &BddManager,
    node: NodeId,
    visited: &mut [bool],
    remaining: &mut Vec<usize>,
    result: &mut Bitset,
) {
    if node.is_terminal() || remaining.is_empty() {
        return;
    }
    let index = node.as_index();
    if visited[index] {
        return;
    }
    visited[index] = true;

    let variable = manager.table.variable_of(node).as_index();
    if let Some(position) = remaining.iter().position(|&v| v == variable) {
        result.set(variable);
        remaining.swap_remove(position);
    }
    let children = manager.table.children_of(node);
    let (low, high) = (children[0], children[1]);
    support_filtered_rec(manager, low, visited, remaining, result);
    support_filtered_rec(manager, high, visited, remaining, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn support_of_and_is_both_variables() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let and_ab = m.and(a, b);
        let support = support(&mut m, and_ab);
        assert!(support.get(va.as_u32() as usize));
        assert!(support.get(vb.as_u32() as usize));
    }

    #[test]
    fn support_of_terminal_is_empty() {
        let mut m = BddManager::new(Config::default());
        let _ = m.create_variable();
        assert_eq!(support(&mut m, NodeId::TRUE).iter_set().count(), 0);
    }
}
