use crate::bdd::BddManager;
use crate::ids::NodeId;
use crate::primitives::Bitset;

/// Lexicographic, depth-first enumeration of every root-to-`TRUE` path (§4.5 `forEachPath`).
///
/// The callback receives two reused, in-place-mutated bitsets: the fixed variable assignment
/// along the current path, and the set of variables skipped by reduction along that path (its
/// "don't cares"). Both are restored to their pre-call state on the way back up, so a single pair
/// of buffers serves the whole traversal.
pub(crate) struct ForEachPath;

impl ForEachPath {
    pub fn run<F: FnMut(&mut Bitset, &mut Bitset)>(manager: &BddManager, node: NodeId, mut action: F) {
        let mut values = Bitset::new();
        let mut dont_care = Bitset::new();
        Self::walk(manager, node, &mut values, &mut dont_care, &mut action);
    }

    fn walk<F: FnMut(&mut Bitset, &mut Bitset)>(
        manager: &BddManager,
        node: NodeId,
        values: &mut Bitset,
        dont_care: &mut Bitset,
        action: &mut F,
    ) {
        if node.is_false() {
            return;
        }
        if node.is_true() {
            action(values, dont_care);
            return;
        }

        let variable = manager.variable_of(node);
        let low = manager.low(node);
        let high = manager.high(node);

        values.clear_bit(variable.as_u32() as usize);
        Self::descend(manager, variable.as_u32(), low, values, dont_care, action);

        values.set(variable.as_u32() as usize);
        Self::descend(manager, variable.as_u32(), high, values, dont_care, action);
        values.clear_bit(variable.as_u32() as usize);
    }

    fn descend<F: FnMut(&mut Bitset, &mut Bitset)>(
        manager: &BddManager,
        parent_variable: u32,
        child: NodeId,
        values: &mut Bitset,
        dont_care: &mut Bitset,
        action: &mut F,
    ) {
        if child.is_false() {
            return;
        }
        let gap_start = parent_variable + 1;
        let gap_end = if child.is_true() {
            manager.number_of_variables()
        } else {
            manager.variable_of(child).as_u32()
        };
        for v in gap_start..gap_end {
            dont_care.set(v as usize);
        }
        Self::walk(manager, child, values, dont_care, action);
        for v in gap_start..gap_end {
            dont_care.clear_bit(v as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn for_each_path_visits_every_satisfying_path() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let b = m.variable_node(vb).unwrap();
        let and_ab = m.and(a, b);

        let mut visits = 0;
        ForEachPath::run(&m, and_ab, |values, dont_care| {
            assert!(values.get(va.as_u32() as usize));
            assert!(values.get(vb.as_u32() as usize));
            assert_eq!(dont_care.iter_set().count(), 0);
            visits += 1;
        });
        assert_eq!(visits, 1);
    }

    #[test]
    fn for_each_path_reports_dont_cares_for_skipped_variables() {
        let mut m = BddManager::new(Config::default());
        let va = m.create_variable();
        let vb = m.create_variable();
        let vc = m.create_variable();
        let a = m.variable_node(va).unwrap();
        let c = m.variable_node(vc).unwrap();
        // `a AND c` skips `b` on every path.
        let formula = m.and(a, c);

        let mut saw_b_as_dont_care = false;
        ForEachPath::run(&m, formula, |_values, dont_care| {
            if dont_care.get(vb.as_u32() as usize) {
                saw_b_as_dont_care = true;
            }
        });
        assert!(saw_b_as_dont_care);
    }
}
