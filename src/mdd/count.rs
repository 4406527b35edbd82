use super::MddManager;
use crate::ids::NodeId;
use num_bigint::BigUint;

/// Number of satisfying assignments to *all* variables known to `manager`, generalising the BDD
/// engine's gap-doubling to a gap *product* over the skipped variables' domain sizes (§5).
pub(crate) fn count_satisfying_assignments(manager: &mut MddManager, node: NodeId) -> BigUint {
    manager.sync_caches();
    let total_variables = manager.number_of_variables();
    let counted = count_rec(manager, node, total_variables);
    let root_index = effective_index(manager, node, total_variables);
    counted * domain_product(manager, 0, root_index)
}

fn effective_index(manager: &MddManager, node: NodeId, total_variables: u32) -> u32 {
    if node.is_true() {
        total_variables
    } else if node.is_false() {
        0
    } else {
        manager.variable_of(node).as_u32()
    }
}

fn domain_product(manager: &MddManager, from: u32, to: u32) -> BigUint {
    let mut product = BigUint::from(1u32);
    for index in from..to {
        product *= BigUint::from(manager.domains[index as usize]);
    }
    product
}

fn count_rec(manager: &mut MddManager, node: NodeId, total_variables: u32) -> BigUint {
    if node.is_false() {
        return BigUint::from(0u32);
    }
    if node.is_true() {
        return BigUint::from(1u32);
    }
    if let Some(cached) = manager.sat_cache.get(node) {
        return cached.clone();
    }

    let variable = manager.variable_of(node).as_u32();
    let domain = manager.domains[variable as usize];
    let mut total = BigUint::from(0u32);
    for value in 0..domain {
        let child = manager.follow(node, value);
        if child.is_false() {
            continue;
        }
        let gap = domain_product(manager, variable + 1, effective_index(manager, child, total_variables));
        total += count_rec(manager, child, total_variables) * gap;
    }

    manager.sat_cache.put(node, total.clone());
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn every_value_literal_ored_together_counts_the_full_domain() {
        let mut m = MddManager::new(Config::default());
        let v = m.create_variable(3).unwrap();
        let eq0 = m.variable_node(v, 0).unwrap();
        let eq1 = m.variable_node(v, 1).unwrap();
        let eq2 = m.variable_node(v, 2).unwrap();
        let eq0_or_eq1 = m.or(eq0, eq1);
        let any = m.or(eq0_or_eq1, eq2);
        assert_eq!(count_satisfying_assignments(&mut m, any), BigUint::from(3u32));
    }

    #[test]
    fn a_single_value_literal_counts_one_assignment_out_of_its_domain() {
        let mut m = MddManager::new(Config::default());
        let v = m.create_variable(4).unwrap();
        let eq2 = m.variable_node(v, 2).unwrap();
        assert_eq!(count_satisfying_assignments(&mut m, eq2), BigUint::from(1u32));
    }

    #[test]
    fn false_counts_zero() {
        let mut m = MddManager::new(Config::default());
        let _ = m.create_variable(3).unwrap();
        assert_eq!(count_satisfying_assignments(&mut m, NodeId::FALSE), BigUint::from(0u32));
    }

    #[test]
    fn two_independent_variables_multiply_their_domains() {
        let mut m = MddManager::new(Config::default());
        let v0 = m.create_variable(2).unwrap();
        let v1 = m.create_variable(5).unwrap();
        let eq0 = m.variable_node(v0, 0).unwrap();
        let _ = v1;
        assert_eq!(count_satisfying_assignments(&mut m, eq0), BigUint::from(5u32));
    }
}
