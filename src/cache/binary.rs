use super::DirectCache;
use crate::ids::NodeId;

/// Operation tag used to key the shared symmetric-binary-op cache (§4.3: AND, OR, XOR, NAND,
/// EQUIV "share commutative cache slots" because the canonical operand ordering is the same for
/// all five — the op tag keeps their entries from colliding semantically).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum SymmetricOp {
    And = 0,
    Or = 1,
    Xor = 2,
    Nand = 3,
    Equiv = 4,
}

/// Cache shared by every symmetric binary operator. Keys are canonicalised by the caller
/// (`(variable(a), a) < (variable(b), b)`) before being passed in, so `(op, a, b)` and
/// `(op, b, a)` land in the same slot.
pub(crate) struct SymmetricBinaryCache {
    inner: DirectCache<(u8, NodeId, NodeId), NodeId>,
}

impl SymmetricBinaryCache {
    pub fn new(divider: usize) -> SymmetricBinaryCache {
        SymmetricBinaryCache {
            inner: DirectCache::new(divider),
        }
    }

    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        self.inner.sync(table_capacity, table_generation);
    }

    pub fn get(&mut self, op: SymmetricOp, a: NodeId, b: NodeId) -> Option<NodeId> {
        self.inner.get(&(op as u8, a, b))
    }

    pub fn put(&mut self, op: SymmetricOp, a: NodeId, b: NodeId, result: NodeId) {
        self.inner.put((op as u8, a, b), result);
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }
}

/// Cache for the asymmetric `IMPLIES` operator — keyed by `(a, b)` with no canonicalisation,
/// since `a => b` is not commutative.
pub(crate) struct AsymmetricBinaryCache {
    inner: DirectCache<(NodeId, NodeId), NodeId>,
}

impl AsymmetricBinaryCache {
    pub fn new(divider: usize) -> AsymmetricBinaryCache {
        AsymmetricBinaryCache {
            inner: DirectCache::new(divider),
        }
    }

    pub fn sync(&mut self, table_capacity: usize, table_generation: u64) {
        self.inner.sync(table_capacity, table_generation);
    }

    pub fn get(&mut self, a: NodeId, b: NodeId) -> Option<NodeId> {
        self.inner.get(&(a, b))
    }

    pub fn put(&mut self, a: NodeId, b: NodeId, result: NodeId) {
        self.inner.put((a, b), result);
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }
}
