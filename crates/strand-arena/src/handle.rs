//! Node handles.
//!
//! A [`NodeHandle`] names a slot in a [`NodeSlab`](crate::NodeSlab) and the
//! generation that slot had when the node was stored. The generation makes
//! staleness an O(1) comparison.

use std::fmt;

/// Stable address of a node within its slab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl NodeHandle {
    pub(crate) fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot index within the slab.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Slot generation at the time the node was stored.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle(slot={}, gen={})", self.slot, self.generation)
    }
}
