//! C6: path and solution enumerators. Implemented against the BDD engine; the MDD engine (§5)
//! mirrors the same traversal shape over variable-arity children.

mod count;
mod paths;
mod solutions;
mod support;

pub(crate) use count::count_satisfying_assignments;
pub(crate) use paths::ForEachPath;
pub use solutions::SolutionIterator;
pub(crate) use support::{support, support_filtered};
