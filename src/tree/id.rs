//! Control node identity.

use std::fmt;

/// A handle to a node in a [`ControlTree`](crate::ControlTree).
///
/// Contains both a slot index and a generation counter so that handles held by
/// queued requests or callers are detected as stale once their node was
/// discarded by a rebuild and the slot reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Raw slot index (for diagnostics only).
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Generation counter of the slot when this handle was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}
