use super::paths::ForEachPath;
use crate::bdd::BddManager;
use crate::ids::NodeId;
use crate::primitives::Bitset;

/// Enumerates every satisfying assignment over a chosen variable domain (`support`), by crossing
/// each root-to-`TRUE` path from [`ForEachPath`] with a binary counter over that path's don't-care
/// variables restricted to `support` (§4.5 `solutionIterator`). The counter visits don't-care
/// extensions in strictly increasing order under the bit-set-as-integer ordering on `support`
/// (§8).
///
/// Paths are collected eagerly (a reduced diagram has at most as many paths as it has internal
/// nodes, far fewer than its solution count), then expanded lazily one counter step at a time.
pub struct SolutionIterator {
    paths: Vec<(Bitset, Vec<usize>)>,
    path_index: usize,
    counter: u64,
    counter_total: u64,
    assignment: Bitset,
}

impl SolutionIterator {
    pub(crate) fn new(manager: &BddManager, node: NodeId, support: Bitset) -> SolutionIterator {
        let mut paths = Vec::new();
        ForEachPath::run(manager, node, |values, dont_care| {
            let dont_cares_in_support: Vec<usize> =
                support.iter_set().filter(|&v| dont_care.get(v)).collect();
            paths.push((values.clone(), dont_cares_in_support));
        });
        let counter_total = paths.first().map(|(_, d)| 1u64 << d.len()).unwrap_or(0);
        SolutionIterator {
            paths,
            path_index: 0,
            counter: 0,
            counter_total,
            assignment: Bitset::new(),
        }
    }

    /// Reports whether a subsequent call to [`SolutionIterator::next`] would yield a value,
    /// without consuming it.
    pub fn has_next(&self) -> bool {
        self.path_index < self.paths.len()
    }

    pub fn next(&mut self) -> Option<&Bitset> {
        loop {
            if self.path_index >= self.paths.len() {
                return None;
            }
            let (values, dont_cares) = &self.paths[self.path_index];
            if self.counter == 0 {
                self.counter_total = 1u64 << dont_cares.len();
            }
            if self.counter >= self.counter_total {
                self.path_index += 1;
                self.counter = 0;
                continue;
            }

            self.assignment = values.clone();
            let code = self.counter;
            for (bit, &variable) in dont_cares.iter().enumerate() {
                if (code >> bit) & 1 == 1 {
                    self.assignment.set(variable);
                } else {
                    self.assignment.clear_bit(variable);
                }
            }
            self.counter += 1;
            return Some(&self.assignment);
        }
    }
}
