//! C5: the multi-valued decision diagram engine. Reuses the node table and operation cache
//! infrastructure built for [`crate::bdd`], generalised to variables of arbitrary finite domain
//! (arity `domain(v)` instead of a fixed 2).

mod apply;
mod compose;
mod count;

use crate::cache::{ParamCache, SatCountCache, SymmetricBinaryCache, TernaryCache, UnaryCache};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ids::{NodeId, VariableId};
use crate::node_table::NodeTable;
use num_bigint::BigUint;

pub(crate) use compose::ComposeParams;

/// A manager for multi-valued decision diagrams. Each variable has its own domain size; a node
/// for variable `v` has exactly `domain(v)` children, one per value.
pub struct MddManager {
    pub(crate) table: NodeTable,
    pub(crate) domains: Vec<u32>,
    /// One saturated literal node per `(variable, value)` pair: `literals[v][k]` is `TRUE` iff
    /// `v == k`.
    pub(crate) literals: Vec<Vec<NodeId>>,
    pub(crate) negation_cache: UnaryCache,
    pub(crate) symmetric_cache: SymmetricBinaryCache,
    pub(crate) ite_cache: TernaryCache,
    pub(crate) compose_cache: ParamCache<ComposeParams>,
    pub(crate) sat_cache: SatCountCache,
    log_statistics_on_shutdown: bool,
}

impl MddManager {
    pub fn new(config: Config) -> MddManager {
        let dividers = config.cache_dividers;
        let log_statistics_on_shutdown = config.log_statistics_on_shutdown;
        MddManager {
            table: NodeTable::new(config),
            domains: Vec::new(),
            literals: Vec::new(),
            negation_cache: UnaryCache::new(dividers.negation),
            symmetric_cache: SymmetricBinaryCache::new(dividers.binary),
            ite_cache: TernaryCache::new(dividers.if_then_else),
            compose_cache: ParamCache::new(dividers.compose),
            sat_cache: SatCountCache::new(dividers.satisfaction_count),
            log_statistics_on_shutdown,
        }
    }

    pub(crate) fn sync_caches(&mut self) {
        let capacity = self.table.capacity();
        let generation = self.table.generation();
        self.negation_cache.sync(capacity, generation);
        self.symmetric_cache.sync(capacity, generation);
        self.ite_cache.sync(capacity, generation);
        self.compose_cache.sync(capacity, generation);
        self.sat_cache.sync(capacity, generation);
    }

    #[inline]
    pub fn true_node(&self) -> NodeId {
        NodeId::TRUE
    }

    #[inline]
    pub fn false_node(&self) -> NodeId {
        NodeId::FALSE
    }

    #[inline]
    pub fn number_of_variables(&self) -> u32 {
        self.domains.len() as u32
    }

    pub fn domain(&self, variable: VariableId) -> Result<u32> {
        self.check_variable(variable)?;
        Ok(self.domains[variable.as_index()])
    }

    /// Allocates one new variable of the given finite `domain` (must be at least 2) and
    /// materialises one saturated literal node per value (§3, §5).
    pub fn create_variable(&mut self, domain: u32) -> Result<VariableId> {
        if domain < 2 {
            return Err(Error::InvalidArgument(
                "an MDD variable's domain must be at least 2".to_string(),
            ));
        }
        self.sync_caches();
        let index = self.domains.len() as u32;
        let v = VariableId::from(index);

        let mut values = Vec::with_capacity(domain as usize);
        for k in 0..domain {
            let mut children = vec![NodeId::FALSE; domain as usize];
            children[k as usize] = NodeId::TRUE;
            let node = self.table.find_or_create(v, &children).expect(
                "literal node creation cannot exhaust capacity right after a fresh sync",
            );
            self.table.saturate(node);
            values.push(node);
        }

        self.domains.push(domain);
        self.literals.push(values);
        Ok(v)
    }

    pub fn variable_node(&self, variable: VariableId, value: u32) -> Result<NodeId> {
        self.check_variable(variable)?;
        let domain = self.domains[variable.as_index()];
        if value >= domain {
            return Err(Error::InvalidArgument(format!(
                "value {} out of range for a variable of domain {}",
                value, domain
            )));
        }
        Ok(self.literals[variable.as_index()][value as usize])
    }

    fn check_variable(&self, variable: VariableId) -> Result<()> {
        if variable.as_index() >= self.domains.len() {
            Err(Error::InvalidVariableIndex {
                index: variable.as_u32(),
                variable_count: self.number_of_variables(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        node.is_terminal()
    }

    pub fn variable_of(&self, node: NodeId) -> VariableId {
        self.table.variable_of(node)
    }

    pub fn follow(&self, node: NodeId, value: u32) -> NodeId {
        debug_assert!(!node.is_terminal(), "follow() of a terminal node");
        self.table.children_of(node)[value as usize]
    }

    pub fn reference(&mut self, node: NodeId) {
        self.table.reference(node);
    }

    pub fn dereference(&mut self, node: NodeId) {
        self.table.dereference(node);
    }

    pub fn reference_count(&self, node: NodeId) -> i64 {
        self.table.reference_count(node)
    }

    pub fn force_gc(&mut self) -> usize {
        self.table.force_gc()
    }

    pub(crate) fn make_node(&mut self, variable: VariableId, children: &[NodeId]) -> Result<NodeId> {
        if let Some(&first) = children.first() {
            if children.iter().all(|&c| c == first) {
                return Ok(first);
            }
        }
        self.table.find_or_create(variable, children)
    }

    pub(crate) fn variable_rank(&self, node: NodeId) -> VariableId {
        if node.is_terminal() {
            VariableId::UNDEFINED
        } else {
            self.table.variable_of(node)
        }
    }

    pub fn evaluate(&self, node: NodeId, assignment: &[u32]) -> bool {
        let mut current = node;
        while !current.is_terminal() {
            let variable = self.table.variable_of(current);
            let value = assignment.get(variable.as_index()).copied().unwrap_or(0);
            current = self.table.children_of(current)[value as usize];
        }
        current.is_true()
    }

    pub fn count_satisfying_assignments(&mut self, node: NodeId) -> BigUint {
        count::count_satisfying_assignments(self, node)
    }

    pub fn statistics(&self) -> String {
        format!(
            "MddManager {{ variables: {}, {}, negation_load: {:.2}, symmetric_load: {:.2}, ite_load: {:.2} }}",
            self.number_of_variables(),
            self.table.statistics(),
            self.negation_cache.load_factor(),
            self.symmetric_cache.load_factor(),
            self.ite_cache.load_factor(),
        )
    }
}

impl Drop for MddManager {
    fn drop(&mut self) {
        if self.log_statistics_on_shutdown {
            log::info!("{}", self.statistics());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_variable_rejects_domain_below_two() {
        let mut m = MddManager::new(Config::default());
        assert!(m.create_variable(1).is_err());
    }

    #[test]
    fn literal_nodes_evaluate_to_their_own_value() {
        let mut m = MddManager::new(Config::default());
        let v = m.create_variable(3).unwrap();
        let eq1 = m.variable_node(v, 1).unwrap();
        assert!(m.evaluate(eq1, &[1]));
        assert!(!m.evaluate(eq1, &[0]));
        assert!(!m.evaluate(eq1, &[2]));
    }
}
