use std::fmt;

/// A unique integer reference to a node stored in a [`crate::node_table::NodeTable`].
///
/// The two smallest values are reserved for the terminal nodes `FALSE` (`0`) and `TRUE` (`1`),
/// mirroring the convention used throughout the reference corpus (e.g. `NodeIndex::ZERO`/`ONE`).
/// The largest representable value is reserved as a placeholder meaning "no replacement" in
/// compose arrays, and is distinct from every valid id.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub const FALSE: NodeId = NodeId(0);
    pub const TRUE: NodeId = NodeId(1);
    /// Sentinel meaning "leave this variable alone" in a compose replacement array.
    pub const PLACEHOLDER: NodeId = NodeId(u64::MAX);

    #[inline]
    pub(crate) fn new(index: u64) -> NodeId {
        debug_assert!(index != u64::MAX, "node id space exhausted");
        NodeId(index)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == NodeId::FALSE || self == NodeId::TRUE
    }

    #[inline]
    pub fn is_false(self) -> bool {
        self == NodeId::FALSE
    }

    #[inline]
    pub fn is_true(self) -> bool {
        self == NodeId::TRUE
    }

    #[inline]
    pub fn is_placeholder(self) -> bool {
        self == NodeId::PLACEHOLDER
    }

    #[inline]
    pub fn terminal(value: bool) -> NodeId {
        if value {
            NodeId::TRUE
        } else {
            NodeId::FALSE
        }
    }

    #[inline]
    pub(crate) fn as_index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> NodeId {
        NodeId::new(index as u64)
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            write!(f, "NodeId(placeholder)")
        } else if self.is_false() {
            write!(f, "NodeId(false)")
        } else if self.is_true() {
            write!(f, "NodeId(true)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A unique, zero-based index of a decision variable.
///
/// Variables are allocated sequentially, so a `VariableId` also doubles as the index into the
/// per-variable metadata vectors (domains, literal nodes) kept by the engines.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VariableId(u32);

impl VariableId {
    /// Sentinel used by terminal nodes, which have no associated decision variable. It compares
    /// greater than every real variable, so "variable(terminal) > v" holds for any real `v` as
    /// required by the ordering invariant.
    pub const UNDEFINED: VariableId = VariableId(u32::MAX);

    #[inline]
    pub(crate) fn new(index: u32) -> VariableId {
        VariableId(index)
    }

    #[inline]
    pub fn is_undefined(self) -> bool {
        self == VariableId::UNDEFINED
    }

    #[inline]
    pub(crate) fn as_index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "VariableId(undefined)")
        } else {
            write!(f, "VariableId({})", self.0)
        }
    }
}

impl From<u32> for VariableId {
    fn from(value: u32) -> Self {
        VariableId::new(value)
    }
}

impl From<VariableId> for u32 {
    fn from(value: VariableId) -> Self {
        value.0
    }
}
