use crate::bdd::BddManager;
use crate::ids::NodeId;
use num_bigint::BigUint;

/// Number of satisfying assignments to *all* variables known to `manager`, including variables
/// that do not appear in `node`'s support (§4.5 "counting treats missing variables as free").
///
/// The recursive step caches, per node, the count of assignments to the variables from that
/// node's own variable downward; the gap between a node and each child (including the implicit
/// gap before a `TRUE` terminal) is multiplied in separately, so the cached value depends only on
/// the node itself and not on how deep it happens to sit under any particular parent.
pub(crate) fn count_satisfying_assignments(manager: &mut BddManager, node: NodeId) -> BigUint {
    manager.sync_caches();
    let total_variables = manager.number_of_variables() as u64;
    let counted = count_rec(manager, node, total_variables);
    let root_level = effective_level(manager, node, total_variables);
    counted << (root_level as usize)
}

fn effective_level(manager: &BddManager, node: NodeId, total_variables: u64) -> u64 {
    if node.is_true() {
        total_variables
    } else if node.is_false() {
        0
    } else {
        manager.variable_of(node).as_u32() as u64
    }
}

fn count_rec(manager: &mut BddManager, node: NodeId, total_variables: u64) -> BigUint {
    if node.is_false() {
        return BigUint::from(0u32);
    }
    if node.is_true() {
        return BigUint::from(1u32);
    }
    if let Some(cached) = manager.sat_cache.get(node) {
        return cached.clone();
    }

    let variable = manager.variable_of(node).as_u32() as u64;
    let low = manager.low(node);
    let high = manager.high(node);

    let low_count = if low.is_false() {
        BigUint::from(0u32)
    } else {
        let gap = effective_level(manager, low, total_variables) - variable - 1;
        count_rec(manager, low, total_variables) << (gap as usize)
    };
    let high_count = if high.is_false() {
        BigUint::from(0u32)
    } else {
        let gap = effective_level(manager, high, total_variables) - variable - 1;
        count_rec(manager, high, total_variables) << (gap as usize)
    };

    let result = low_count + high_count;
    manager.sat_cache.put(node, result.clone());
    result
}
