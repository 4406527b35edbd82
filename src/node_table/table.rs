use super::node::NodeRecord;
use super::reference::RefRecord;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ids::{NodeId, VariableId};
use crate::primitives::{mix2, next_prime};

/// Realistic upper bound on the node id space: the distilled spec (§3, §7) assumes a fixed upper
/// bit width for node ids. We treat 32 bits as that bound — enough headroom for any diagram this
/// single-threaded, in-process engine can realistically build, while keeping `CapacityExhausted`
/// reachable (and testable) without requiring multi-gigabyte allocations.
const MAX_CAPACITY: usize = u32::MAX as usize;

/// C2: the shared node table. Stores nodes of uniform arity per table (2 for a `BddManager`,
/// `domain(v)` for an `MddManager`'s per-variable tables), hash-conses them for strong
/// canonicity, tracks reference counts, and runs mark-and-sweep GC and growth on demand.
pub(crate) struct NodeTable {
    nodes: Vec<NodeRecord>,
    refs: Vec<RefRecord>,
    marks: Vec<bool>,
    buckets: Vec<u64>,
    free_head: u64,
    /// Bumped on every GC pass and every growth; callers compare against a cached generation to
    /// decide whether their caches must be invalidated (§3 "Lifecycles").
    generation: u64,
    /// Approximate count of nodes whose reference count reached zero since the last GC. Only used
    /// as a heuristic hint (§4.2's dead-node counter is explicitly approximate); the authoritative
    /// GC trigger remains "the free list is empty".
    dead_count_approx: usize,
    work_stack: Vec<NodeId>,
    mark_stack: Vec<NodeId>,
    config: Config,
}

impl NodeTable {
    pub fn new(config: Config) -> NodeTable {
        let initial_size = config.initial_size.max(2);
        let bucket_count = next_prime(initial_size);
        let mut table = NodeTable {
            nodes: Vec::with_capacity(initial_size),
            refs: Vec::with_capacity(initial_size),
            marks: Vec::with_capacity(initial_size),
            buckets: vec![RefRecord::NONE; bucket_count],
            free_head: RefRecord::NONE,
            generation: 0,
            dead_count_approx: 0,
            work_stack: Vec::new(),
            mark_stack: Vec::new(),
            config,
        };
        // Slots 0 and 1 are the terminal nodes, saturated (permanently live) from creation.
        table.nodes.push(NodeRecord::terminal());
        table.nodes.push(NodeRecord::terminal());
        table.marks.push(false);
        table.marks.push(false);
        table.refs.push(RefRecord {
            next: RefRecord::NONE,
            ref_count: 0,
            saturated: true,
            valid: true,
        });
        table.refs.push(RefRecord {
            next: RefRecord::NONE,
            ref_count: 0,
            saturated: true,
            valid: true,
        });
        for slot in 2..initial_size {
            table.refs.push(RefRecord::free(table.free_head));
            table.nodes.push(NodeRecord::terminal());
            table.marks.push(false);
            table.free_head = slot as u64;
        }
        table
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn variable_of(&self, id: NodeId) -> VariableId {
        self.nodes[id.as_index()].variable
    }

    #[inline]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.as_index()].children
    }

    #[inline]
    pub fn is_valid(&self, id: NodeId) -> bool {
        id.as_index() < self.refs.len() && self.refs[id.as_index()].valid
    }

    /// Hash-consing lookup-or-insert (§4.2 `findOrCreate`). Does **not** perform the BDD/MDD
    /// reduction check (`low == high` / all children equal) — that is the caller's
    /// (`makeNode`'s) responsibility, matching the distilled spec's split between `makeNode` and
    /// `findOrCreate`.
    pub fn find_or_create(&mut self, variable: VariableId, children: &[NodeId]) -> Result<NodeId> {
        loop {
            let hash = self.hash_of(variable, children);
            let bucket = self.bucket_index(hash);

            let mut cursor = self.buckets[bucket];
            while cursor != RefRecord::NONE {
                let index = cursor as usize;
                if self.nodes[index].matches(variable, children) {
                    return Ok(NodeId::from_index(index));
                }
                cursor = self.refs[index].next;
            }

            match self.pop_free_slot() {
                Some(slot) => {
                    self.nodes[slot] = NodeRecord {
                        variable,
                        children: children.into(),
                    };
                    self.refs[slot] = RefRecord::fresh_valid(self.buckets[bucket]);
                    self.buckets[bucket] = slot as u64;
                    return Ok(NodeId::from_index(slot));
                }
                None => {
                    self.grow_or_collect()?;
                    // Capacity or bucket layout may have changed; recompute on the next loop
                    // iteration rather than reusing a stale bucket/hash.
                }
            }
        }
    }

    fn hash_of(&self, variable: VariableId, children: &[NodeId]) -> u64 {
        let mut h = variable.as_u32() as u64;
        for child in children {
            h = mix2(h, child.as_u64());
        }
        h
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn pop_free_slot(&mut self) -> Option<usize> {
        if self.free_head == RefRecord::NONE {
            return None;
        }
        let slot = self.free_head as usize;
        self.free_head = self.refs[slot].next;
        Some(slot)
    }

    // --- Reference management -------------------------------------------------------------

    pub fn reference(&mut self, id: NodeId) {
        if id.is_terminal() {
            return;
        }
        let r = &mut self.refs[id.as_index()];
        debug_assert!(r.valid, "reference() on a recycled node id");
        if r.saturated {
            return;
        }
        if r.ref_count == RefRecord::MAX_REF_COUNT {
            r.saturated = true;
        } else {
            r.ref_count += 1;
        }
    }

    /// Marks a node permanently live without going through the overflow path of repeated
    /// `reference()` calls. Used by the BDD/MDD engines to saturate literal nodes at creation,
    /// matching §3's "each new variable materialises two saturated nodes".
    pub fn saturate(&mut self, id: NodeId) {
        if id.is_terminal() {
            return;
        }
        self.refs[id.as_index()].saturated = true;
    }

    pub fn dereference(&mut self, id: NodeId) {
        if id.is_terminal() {
            return;
        }
        let r = &mut self.refs[id.as_index()];
        debug_assert!(r.valid, "dereference() on a recycled node id");
        if r.saturated {
            return;
        }
        debug_assert!(r.ref_count > 0, "reference count underflow");
        if r.ref_count > 0 {
            r.ref_count -= 1;
            if r.ref_count == 0 {
                self.dead_count_approx += 1;
            }
        }
    }

    /// Returns `-1` for saturated nodes (including terminals), matching the external contract.
    pub fn reference_count(&self, id: NodeId) -> i64 {
        if id.is_terminal() {
            return -1;
        }
        let r = &self.refs[id.as_index()];
        if r.saturated {
            -1
        } else {
            r.ref_count as i64
        }
    }

    // --- Work stack ------------------------------------------------------------------------

    pub fn push_work(&mut self, id: NodeId) {
        self.work_stack.push(id);
    }

    pub fn pop_work(&mut self) {
        self.work_stack.pop();
    }

    pub fn work_stack_len(&self) -> usize {
        self.work_stack.len()
    }

    pub fn truncate_work(&mut self, len: usize) {
        self.work_stack.truncate(len);
    }

    // --- GC & growth -----------------------------------------------------------------------

    /// Runs mark-and-sweep GC unconditionally and returns the number of nodes it freed.
    pub fn force_gc(&mut self) -> usize {
        self.mark_stack.clear();
        for mark in &mut self.marks {
            *mark = false;
        }

        for index in 0..self.refs.len() {
            if self.refs[index].is_live_root() {
                self.mark_stack.push(NodeId::from_index(index));
            }
        }
        for &root in &self.work_stack.clone() {
            if !root.is_terminal() {
                self.mark_stack.push(root);
            }
        }
        self.marks[0] = true;
        self.marks[1] = true;

        while let Some(id) = self.mark_stack.pop() {
            let index = id.as_index();
            if self.marks[index] {
                continue;
            }
            self.marks[index] = true;
            for &child in self.nodes[index].children.clone().iter() {
                if !child.is_terminal() && self.refs[child.as_index()].valid && !self.marks[child.as_index()] {
                    self.mark_stack.push(child);
                }
            }
        }

        // Sweep: rebuild every bucket chain from scratch, freeing unmarked slots.
        for bucket in &mut self.buckets {
            *bucket = RefRecord::NONE;
        }
        let mut freed = 0usize;
        for index in (2..self.refs.len()).rev() {
            if !self.refs[index].valid {
                continue;
            }
            if self.marks[index] {
                let variable = self.nodes[index].variable;
                let children = self.nodes[index].children.clone();
                let hash = self.hash_of(variable, &children);
                let bucket = self.bucket_index(hash);
                self.refs[index].next = self.buckets[bucket];
                self.buckets[bucket] = index as u64;
            } else {
                self.refs[index] = RefRecord::free(self.free_head);
                self.free_head = index as u64;
                freed += 1;
            }
        }

        self.dead_count_approx = 0;
        self.generation += 1;
        log::trace!(
            "gc freed {} of {} node slots (generation {})",
            freed,
            self.refs.len(),
            self.generation
        );
        freed
    }

    fn grow_or_collect(&mut self) -> Result<()> {
        if self.config.use_garbage_collection {
            let freed = self.force_gc();
            let freed_fraction = freed as f64 / self.capacity() as f64;
            if freed_fraction >= self.config.minimum_free_node_percentage_after_gc {
                return Ok(());
            }
            log::warn!(
                "gc reclaimed only {:.1}% of the table (below the {:.1}% threshold); growing instead",
                freed_fraction * 100.0,
                self.config.minimum_free_node_percentage_after_gc * 100.0
            );
        }
        self.grow()
    }

    fn grow(&mut self) -> Result<()> {
        if self.capacity() >= MAX_CAPACITY {
            return Err(Error::CapacityExhausted);
        }
        let grown = ((self.capacity() as f64) * self.config.growth_factor) as usize;
        let new_capacity = grown.max(self.capacity() + 1).min(MAX_CAPACITY);

        let old_capacity = self.capacity();
        self.nodes.resize_with(new_capacity, NodeRecord::terminal);
        self.marks.resize(new_capacity, false);
        self.refs.resize(new_capacity, RefRecord::free(RefRecord::NONE));
        for slot in old_capacity..new_capacity {
            self.refs[slot] = RefRecord::free(self.free_head);
            self.free_head = slot as u64;
        }

        let new_bucket_count = next_prime(new_capacity);
        self.buckets = vec![RefRecord::NONE; new_bucket_count];
        for index in 0..old_capacity {
            if self.refs[index].valid {
                let variable = self.nodes[index].variable;
                let children = self.nodes[index].children.clone();
                let hash = self.hash_of(variable, &children);
                let bucket = self.bucket_index(hash);
                self.refs[index].next = self.buckets[bucket];
                self.buckets[bucket] = index as u64;
            }
        }

        self.generation += 1;
        log::debug!(
            "node table grew from {} to {} slots (generation {})",
            old_capacity,
            new_capacity,
            self.generation
        );
        Ok(())
    }

    pub fn statistics(&self) -> String {
        let live = self.refs.iter().filter(|r| r.valid).count();
        let saturated = self.refs.iter().filter(|r| r.valid && r.saturated).count();
        format!(
            "NodeTable {{ capacity: {}, live: {}, saturated: {}, buckets: {}, generation: {}, dead_approx: {} }}",
            self.capacity(),
            live,
            saturated,
            self.buckets.len(),
            self.generation,
            self.dead_count_approx
        )
    }
}
