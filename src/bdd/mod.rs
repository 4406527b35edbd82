//! C4: the binary decision diagram engine.

mod apply;
mod apply_iter;
mod compose;
mod implies;
mod quantify;

use crate::cache::{AsymmetricBinaryCache, ParamCache, SatCountCache, SymmetricBinaryCache, TernaryCache, UnaryCache};
use crate::config::Config;
use crate::enumerate::ForEachPath;
use crate::error::{Error, Result};
use crate::ids::{NodeId, VariableId};
use crate::node_table::NodeTable;
use crate::primitives::Bitset;
use num_bigint::BigUint;

pub(crate) use compose::ComposeParams;
pub(crate) use quantify::QuantParams;
pub use crate::enumerate::SolutionIterator;

/// A manager for binary decision diagrams: one shared node table, plus every operation cache
/// family from §4.3, plus the per-variable literal nodes described in §3.
pub struct BddManager {
    pub(crate) table: NodeTable,
    pub(crate) literals: Vec<(NodeId, NodeId)>, // (positive, negative) per variable
    pub(crate) negation_cache: UnaryCache,
    pub(crate) symmetric_cache: SymmetricBinaryCache,
    pub(crate) implies_cache: AsymmetricBinaryCache,
    pub(crate) ite_cache: TernaryCache,
    pub(crate) compose_cache: ParamCache<ComposeParams>,
    pub(crate) quant_cache: ParamCache<QuantParams>,
    pub(crate) sat_cache: SatCountCache,
    log_statistics_on_shutdown: bool,
}

impl BddManager {
    pub fn new(config: Config) -> BddManager {
        let dividers = config.cache_dividers;
        let log_statistics_on_shutdown = config.log_statistics_on_shutdown;
        BddManager {
            table: NodeTable::new(config),
            literals: Vec::new(),
            negation_cache: UnaryCache::new(dividers.negation),
            symmetric_cache: SymmetricBinaryCache::new(dividers.binary),
            implies_cache: AsymmetricBinaryCache::new(dividers.implication),
            ite_cache: TernaryCache::new(dividers.if_then_else),
            compose_cache: ParamCache::new(dividers.compose),
            quant_cache: ParamCache::new(dividers.quantification),
            sat_cache: SatCountCache::new(dividers.satisfaction_count),
            log_statistics_on_shutdown,
        }
    }

    /// Syncs every cache against the table's current capacity/generation. Called at the start of
    /// every top-level public operation, mirroring §3's "caches are invalidated on GC and on
    /// table growth".
    pub(crate) fn sync_caches(&mut self) {
        let capacity = self.table.capacity();
        let generation = self.table.generation();
        self.negation_cache.sync(capacity, generation);
        self.symmetric_cache.sync(capacity, generation);
        self.implies_cache.sync(capacity, generation);
        self.ite_cache.sync(capacity, generation);
        self.compose_cache.sync(capacity, generation);
        self.quant_cache.sync(capacity, generation);
        self.sat_cache.sync(capacity, generation);
    }

    // --- Terminals & variables (§6) --------------------------------------------------------

    #[inline]
    pub fn true_node(&self) -> NodeId {
        NodeId::TRUE
    }

    #[inline]
    pub fn false_node(&self) -> NodeId {
        NodeId::FALSE
    }

    #[inline]
    pub fn placeholder(&self) -> NodeId {
        NodeId::PLACEHOLDER
    }

    #[inline]
    pub fn number_of_variables(&self) -> u32 {
        self.literals.len() as u32
    }

    /// Allocates one new variable and materialises its positive and negative literal nodes,
    /// which are saturated (permanently live) from creation (§3).
    pub fn create_variable(&mut self) -> VariableId {
        self.sync_caches();
        let index = self.literals.len() as u32;
        let v = VariableId::from(index);
        let positive = self
            .table
            .find_or_create(v, &[NodeId::FALSE, NodeId::TRUE])
            .expect("literal node creation cannot exhaust capacity right after a fresh sync");
        let negative = self
            .table
            .find_or_create(v, &[NodeId::TRUE, NodeId::FALSE])
            .expect("literal node creation cannot exhaust capacity right after a fresh sync");
        self.table.saturate(positive);
        self.table.saturate(negative);
        self.literals.push((positive, negative));
        v
    }

    pub fn create_variables(&mut self, count: usize) -> Result<Vec<VariableId>> {
        if count == 0 {
            return Err(Error::InvalidArgument(
                "create_variables requires count > 0".to_string(),
            ));
        }
        Ok((0..count).map(|_| self.create_variable()).collect())
    }

    pub fn variable_node(&self, variable: VariableId) -> Result<NodeId> {
        self.check_variable(variable)?;
        Ok(self.literals[variable.as_index()].0)
    }

    /// Builds the conjunction of the given variables' positive literals (§6). The empty
    /// conjunction is `TRUE`.
    pub fn conjunction(&mut self, variables: &[VariableId]) -> Result<NodeId> {
        let mut result = NodeId::TRUE;
        for &variable in variables {
            let literal = self.variable_node(variable)?;
            result = self.and(result, literal);
        }
        Ok(result)
    }

    /// Builds the disjunction of the given variables' positive literals (§6). The empty
    /// disjunction is `FALSE`.
    pub fn disjunction(&mut self, variables: &[VariableId]) -> Result<NodeId> {
        let mut result = NodeId::FALSE;
        for &variable in variables {
            let literal = self.variable_node(variable)?;
            result = self.or(result, literal);
        }
        Ok(result)
    }

    fn check_variable(&self, variable: VariableId) -> Result<()> {
        if variable.as_index() >= self.literals.len() {
            Err(Error::InvalidVariableIndex {
                index: variable.as_u32(),
                variable_count: self.number_of_variables(),
            })
        } else {
            Ok(())
        }
    }

    // --- Inspection (§6) ---------------------------------------------------------------------

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        node.is_terminal()
    }

    pub fn is_variable(&self, node: NodeId) -> bool {
        if node.is_terminal() {
            return false;
        }
        let children = self.table.children_of(node);
        children[0] == NodeId::FALSE && children[1] == NodeId::TRUE
    }

    pub fn is_variable_negated(&self, node: NodeId) -> bool {
        if node.is_terminal() {
            return false;
        }
        let children = self.table.children_of(node);
        children[0] == NodeId::TRUE && children[1] == NodeId::FALSE
    }

    pub fn is_variable_or_negated(&self, node: NodeId) -> bool {
        self.is_variable(node) || self.is_variable_negated(node)
    }

    pub fn variable_of(&self, node: NodeId) -> VariableId {
        self.table.variable_of(node)
    }

    pub fn low(&self, node: NodeId) -> NodeId {
        debug_assert!(!node.is_terminal(), "low() of a terminal node");
        self.table.children_of(node)[0]
    }

    pub fn high(&self, node: NodeId) -> NodeId {
        debug_assert!(!node.is_terminal(), "high() of a terminal node");
        self.table.children_of(node)[1]
    }

    // --- Reference management (§6) ------------------------------------------------------------

    pub fn reference(&mut self, node: NodeId) {
        self.table.reference(node);
    }

    pub fn dereference(&mut self, node: NodeId) {
        self.table.dereference(node);
    }

    pub fn dereference_many(&mut self, nodes: &[NodeId]) {
        for &node in nodes {
            self.table.dereference(node);
        }
    }

    pub fn reference_count(&self, node: NodeId) -> i64 {
        self.table.reference_count(node)
    }

    pub fn force_gc(&mut self) -> usize {
        self.table.force_gc()
    }

    // --- Construction: `makeNode` (§4.3 primitive constructor) --------------------------------

    /// `makeNode(v, low, high)`: reduces (`low == high` returns the common child) or hash-conses
    /// through the node table. Children must already satisfy the ordering invariant.
    pub(crate) fn make_node(&mut self, variable: VariableId, low: NodeId, high: NodeId) -> Result<NodeId> {
        if low == high {
            return Ok(low);
        }
        debug_assert!(
            self.variable_order_ok(variable, low) && self.variable_order_ok(variable, high),
            "makeNode called with a child whose variable does not exceed the parent's"
        );
        self.table.find_or_create(variable, &[low, high])
    }

    fn variable_order_ok(&self, variable: VariableId, child: NodeId) -> bool {
        child.is_terminal() || self.table.variable_of(child) > variable
    }

    pub(crate) fn variable_rank(&self, node: NodeId) -> VariableId {
        if node.is_terminal() {
            VariableId::UNDEFINED
        } else {
            self.table.variable_of(node)
        }
    }

    // --- Evaluation (§6) -----------------------------------------------------------------------

    pub fn evaluate(&self, node: NodeId, assignment: &[bool]) -> bool {
        let mut current = node;
        while !current.is_terminal() {
            let variable = self.table.variable_of(current);
            let value = assignment.get(variable.as_index()).copied().unwrap_or(false);
            let children = self.table.children_of(current);
            current = if value { children[1] } else { children[0] };
        }
        current.is_true()
    }

    pub fn evaluate_bits(&self, node: NodeId, assignment: &Bitset) -> bool {
        let mut current = node;
        while !current.is_terminal() {
            let variable = self.table.variable_of(current);
            let value = assignment.get(variable.as_index());
            let children = self.table.children_of(current);
            current = if value { children[1] } else { children[0] };
        }
        current.is_true()
    }

    // --- Diagnostics (§6) ----------------------------------------------------------------------

    pub fn statistics(&self) -> String {
        format!(
            "BddManager {{ variables: {}, {}, negation_load: {:.2}, symmetric_load: {:.2}, implies_load: {:.2}, ite_load: {:.2} }}",
            self.number_of_variables(),
            self.table.statistics(),
            self.negation_cache.load_factor(),
            self.symmetric_cache.load_factor(),
            self.implies_cache.load_factor(),
            self.ite_cache.load_factor(),
        )
    }

    // --- Enumeration (§6, implemented in crate::enumerate) -------------------------------------

    pub fn support(&mut self, node: NodeId) -> Bitset {
        crate::enumerate::support(self, node)
    }

    pub fn support_filtered(&mut self, node: NodeId, mask: &Bitset) -> Bitset {
        crate::enumerate::support_filtered(self, node, mask)
    }

    pub fn count_satisfying_assignments(&mut self, node: NodeId) -> BigUint {
        crate::enumerate::count_satisfying_assignments(self, node)
    }

    pub fn count_satisfying_assignments_with_support(&mut self, node: NodeId, support: &Bitset) -> BigUint {
        let full = self.count_satisfying_assignments(node);
        let dont_care = (self.number_of_variables() as usize).saturating_sub(support.iter_set().count());
        full >> dont_care
    }

    pub fn get_satisfying_assignment(&mut self, node: NodeId) -> Result<Bitset> {
        if node.is_false() {
            return Err(Error::InvalidArgument(
                "FALSE has no satisfying assignment".to_string(),
            ));
        }
        let mut assignment = Bitset::new();
        let mut current = node;
        while !current.is_terminal() {
            let variable = self.table.variable_of(current);
            let children = self.table.children_of(current);
            if children[1].is_false() {
                current = children[0];
            } else {
                assignment.set(variable.as_index());
                current = children[1];
            }
        }
        Ok(assignment)
    }

    pub fn for_each_path<F: FnMut(&mut Bitset, &mut Bitset)>(&self, node: NodeId, action: F) {
        ForEachPath::run(self, node, action)
    }

    pub fn solution_iterator(&self, node: NodeId, support: Bitset) -> SolutionIterator {
        SolutionIterator::new(self, node, support)
    }

    pub fn for_each_solution<F: FnMut(&Bitset)>(&self, node: NodeId, support: Bitset, mut action: F) {
        let mut it = self.solution_iterator(node, support);
        while let Some(assignment) = it.next() {
            action(assignment);
        }
    }
}

impl Drop for BddManager {
    fn drop(&mut self) {
        if self.log_statistics_on_shutdown {
            log::info!("{}", self.statistics());
        }
    }
}
