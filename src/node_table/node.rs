use crate::ids::{NodeId, VariableId};

/// The node half of a node table slot (§3 "Node table entry").
///
/// Terminal nodes (slots 0 and 1) are represented with `variable = VariableId::UNDEFINED` and an
/// empty `children` slice — they have no decision variable and no outgoing edges, which is a more
/// direct encoding of "terminal" than the self-loop convention some decision-diagram codebases
/// use, since `NodeId` already distinguishes terminals structurally (`NodeId::is_terminal`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct NodeRecord {
    pub variable: VariableId,
    pub children: Box<[NodeId]>,
}

impl NodeRecord {
    pub fn terminal() -> NodeRecord {
        NodeRecord {
            variable: VariableId::UNDEFINED,
            children: Box::new([]),
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.variable.is_undefined()
    }

    pub fn matches(&self, variable: VariableId, children: &[NodeId]) -> bool {
        self.variable == variable && &*self.children == children
    }
}
