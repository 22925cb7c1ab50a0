//! Slot+generation storage for list nodes.
//!
//! [`NodeSlab`] stores [`Node`]s in a `Vec` of slots. Nodes are released
//! all at once, when their list is cleared or dropped, and the freed slots
//! are reused through a free list. Each slot carries a generation counter
//! that increments on release, so a [`NodeHandle`] from before the release
//! no longer resolves.

use strand_core::{AllocRequest, Allocation, Allocator, RecordKind, Value};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::NodeHandle;

/// A single list cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// The stored value.
    pub value: Value,
    /// The successor, or `None` for the last node of a chain.
    pub next: Option<NodeHandle>,
}

impl Node {
    /// A node with no successor.
    pub fn new(value: Value) -> Self {
        Self { value, next: None }
    }

    /// A node linked in front of `next`.
    pub fn linked(value: Value, next: Option<NodeHandle>) -> Self {
        Self { value, next }
    }
}

/// A live node together with the allocation that backs it.
#[derive(Debug)]
struct Entry {
    node: Node,
    allocation: Allocation,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Generational slab of list nodes.
///
/// The slab never talks to an allocator on its own: callers pass the
/// allocator into [`alloc`](NodeSlab::alloc) and
/// [`release_all`](NodeSlab::release_all), so
/// one slab type serves every allocator a list can be built with.
#[derive(Debug)]
pub struct NodeSlab {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
    config: ArenaConfig,
}

impl NodeSlab {
    /// Create an empty slab.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            free_list: Vec::new(),
            live: 0,
            config,
        }
    }

    /// Store `node`, after the allocator grants a node record for it.
    ///
    /// Fails without consulting the allocator when the slab is already at
    /// its node limit.
    pub fn alloc(&mut self, node: Node, allocator: &dyn Allocator) -> Result<NodeHandle, ArenaError> {
        let capacity = self.config.max_nodes as usize;
        // Slot indices must stay addressable by a u32 handle.
        let slots_exhausted = self.free_list.is_empty() && self.slots.len() >= u32::MAX as usize;
        if self.live >= capacity || slots_exhausted {
            return Err(ArenaError::CapacityExceeded {
                requested: self.live + 1,
                capacity,
            });
        }

        let allocation = allocator.allocate(AllocRequest::of::<Node>(RecordKind::Node))?;
        let entry = Entry { node, allocation };

        let handle = if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.entry = Some(entry);
            NodeHandle::new(slot_idx, slot.generation)
        } else {
            let slot_idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            NodeHandle::new(slot_idx, 0)
        };

        self.live += 1;
        Ok(handle)
    }

    /// Resolve a handle to its node.
    ///
    /// Returns `None` if the handle is stale or was never valid.
    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref().map(|e| &e.node)
    }

    /// Resolve a handle to its node mutably.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        let slot = self.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_mut().map(|e| &mut e.node)
    }

    /// Release every live node and hand each grant back to `allocator`.
    /// Returns how many were released.
    ///
    /// Bumps every released slot's generation. A slot whose generation
    /// would overflow is retired rather than recycled, so no handle from an
    /// earlier epoch can resolve again.
    pub fn release_all(&mut self, allocator: &dyn Allocator) -> usize {
        let mut released = 0;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if let Some(entry) = slot.entry.take() {
                if let Some(next) = slot.generation.checked_add(1) {
                    slot.generation = next;
                    self.free_list.push(idx as u32);
                }
                allocator.release(entry.allocation);
                released += 1;
            }
        }
        self.live = 0;
        released
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the slab holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slots (live + free + retired).
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of released slots available for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }
}

impl Default for NodeSlab {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}
