//! C7: a scope guard that balances `reference`/`dereference` calls via `Drop`.

use crate::bdd::BddManager;
use crate::ids::NodeId;

/// Holds one reference to `node` for as long as the guard is alive, releasing it on drop — even
/// if the enclosing scope exits early through `?` or a panic. Replaces the "call release on every
/// exit path" discipline the distilled design otherwise places on callers.
pub struct ReferenceGuard<'a> {
    manager: &'a mut BddManager,
    node: NodeId,
}

impl<'a> ReferenceGuard<'a> {
    pub fn new(manager: &'a mut BddManager, node: NodeId) -> ReferenceGuard<'a> {
        manager.reference(node);
        ReferenceGuard { manager, node }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn manager_mut(&mut self) -> &mut BddManager {
        self.manager
    }
}

impl<'a> Drop for ReferenceGuard<'a> {
    fn drop(&mut self) {
        self.manager.dereference(self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn guard_references_on_construction_and_dereferences_on_drop() {
        let mut m = BddManager::new(Config::default());
        let v = m.create_variable();
        let a = m.variable_node(v).unwrap();
        let and_self = m.and(a, a);
        assert_eq!(and_self, a);

        let b = m.create_variable();
        let bnode = m.variable_node(b).unwrap();
        let combined = m.and(a, bnode);
        assert_eq!(m.reference_count(combined), 0);
        {
            let guard = ReferenceGuard::new(&mut m, combined);
            assert_eq!(guard.manager_mut().reference_count(combined), 1);
        }
        assert_eq!(m.reference_count(combined), 0);
    }
}
