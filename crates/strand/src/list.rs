//! The singly linked list.
//!
//! A [`List`] owns a [`NodeSlab`] holding its nodes, the handle of the
//! first node, a cached handle of the last node, and a structural
//! generation counter. Every node, the list header, and every cursor is
//! granted by the allocator the list was built with.
//!
//! # Invariants
//!
//! - `head.is_none()` iff the list is empty.
//! - The chain from `head` is acyclic and visits every live slab node
//!   exactly once; `tail` is its last node.
//! - Node order is insertion order as dictated by the insert used.
//! - `generation` increases on every successful structural change
//!   (insert, non-empty clear) and on nothing else.

use std::fmt;

use smallvec::SmallVec;
use strand_arena::{ArenaError, Node, NodeHandle, NodeSlab};
use strand_core::{
    AllocRequest, Allocator, ListId, Record, RecordKind, SharedAllocator, SystemAllocator, Value,
};

use crate::config::ListConfig;
use crate::cursor::Cursor;
use crate::error::ListError;
use crate::iter::{Iter, Links};
use crate::metrics::ListMetrics;

#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    node_allocations: u64,
    node_releases: u64,
    failed_allocations: u64,
}

/// A singly linked list of [`Value`]s.
///
/// Dropping the list releases every node and then the list's own record
/// through its allocator.
///
/// ```
/// use strand::List;
///
/// let mut list = List::new().unwrap();
/// list.insert_end(2).unwrap();
/// list.insert_front(1).unwrap();
/// list.insert(2, 3).unwrap();
///
/// assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(list.find(3), Ok(2));
///
/// let mut cursor = list.cursor(0).unwrap();
/// assert_eq!((cursor.index(), cursor.value()), (0, 1));
/// list.advance(&mut cursor).unwrap();
/// assert_eq!((cursor.index(), cursor.value()), (1, 2));
/// ```
pub struct List {
    id: ListId,
    slab: NodeSlab,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    generation: u64,
    counters: Counters,
    record: Record,
}

impl List {
    /// Create an empty list backed by a fresh [`SystemAllocator`].
    pub fn new() -> Result<Self, ListError> {
        Self::new_in(SystemAllocator::shared())
    }

    /// Create an empty list that allocates through `allocator`.
    pub fn new_in(allocator: SharedAllocator) -> Result<Self, ListError> {
        Self::with_config(ListConfig::default(), allocator)
    }

    /// Create an empty list with explicit configuration.
    ///
    /// Fails with [`ListError::Config`] if `config` is invalid, or with
    /// [`ListError::AllocationFailed`] if the allocator refuses the list
    /// record.
    pub fn with_config(config: ListConfig, allocator: SharedAllocator) -> Result<Self, ListError> {
        config.validate()?;
        let record = Record::allocate(&allocator, AllocRequest::of::<List>(RecordKind::List))?;
        Ok(Self {
            id: ListId::next(),
            slab: NodeSlab::new(config.arena_config()),
            head: None,
            tail: None,
            generation: 0,
            counters: Counters::default(),
            record,
        })
    }

    /// This list's unique identifier.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Structural generation. Changes whenever cursors are invalidated.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The allocator this list was built with.
    pub fn allocator(&self) -> &SharedAllocator {
        self.record.allocator()
    }

    // ── Mutation ───────────────────────────────────────────────────

    /// Insert `value` as the new first element.
    pub fn insert_front(&mut self, value: Value) -> Result<(), ListError> {
        let handle = self.alloc_node(Node::linked(value, self.head))?;
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
        self.head = Some(handle);
        self.bump_generation();
        Ok(())
    }

    /// Insert `value` as the new last element.
    pub fn insert_end(&mut self, value: Value) -> Result<(), ListError> {
        let handle = self.alloc_node(Node::new(value))?;
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.slab.get_mut(tail) {
                    node.next = Some(handle);
                }
            }
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        self.bump_generation();
        Ok(())
    }

    /// Insert `value` so that it ends up at `index`.
    ///
    /// `index == len()` appends and `index == 0` prepends. Any larger
    /// index fails with [`ListError::OutOfBounds`] before the allocator is
    /// consulted.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<(), ListError> {
        let len = self.len();
        if index > len {
            return Err(ListError::OutOfBounds { index, len });
        }
        if index == 0 {
            return self.insert_front(value);
        }
        if index == len {
            return self.insert_end(value);
        }

        let prev = self
            .handle_at(index - 1)
            .ok_or(ListError::OutOfBounds { index, len })?;
        let next = self.slab.get(prev).and_then(|node| node.next);
        let handle = self.alloc_node(Node::linked(value, next))?;
        if let Some(node) = self.slab.get_mut(prev) {
            node.next = Some(handle);
        }
        self.bump_generation();
        Ok(())
    }

    /// Replace the value at `index`, returning the old value.
    ///
    /// Value updates are not structural: the generation is unchanged and
    /// existing cursors stay valid, though their value snapshot is not
    /// refreshed (see [`current`](Self::current)).
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value, ListError> {
        let len = self.len();
        let node = self
            .handle_at(index)
            .and_then(|handle| self.slab.get_mut(handle))
            .ok_or(ListError::OutOfBounds { index, len })?;
        Ok(std::mem::replace(&mut node.value, value))
    }

    /// Release every node. The list itself stays usable.
    pub fn clear(&mut self) {
        if self.head.is_none() {
            return;
        }
        let released = self.slab.release_all(&**self.record.allocator());
        self.counters.node_releases += released as u64;
        self.head = None;
        self.tail = None;
        self.bump_generation();
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// Index of the first element equal to `value`, head to tail.
    pub fn find(&self, value: Value) -> Result<usize, ListError> {
        self.iter()
            .position(|v| v == value)
            .ok_or(ListError::NotFound)
    }

    /// Indices of every element equal to `value`, in order.
    pub fn positions(&self, value: Value) -> SmallVec<[usize; 4]> {
        self.iter()
            .enumerate()
            .filter(|&(_, v)| v == value)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether any element equals `value`.
    pub fn contains(&self, value: Value) -> bool {
        self.iter().any(|v| v == value)
    }

    /// The value at `index`.
    pub fn get(&self, index: usize) -> Result<Value, ListError> {
        self.iter().nth(index).ok_or(ListError::OutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// The first value, if any.
    pub fn front(&self) -> Option<Value> {
        self.head
            .and_then(|h| self.slab.get(h))
            .map(|node| node.value)
    }

    /// The last value, if any.
    pub fn back(&self) -> Option<Value> {
        self.tail
            .and_then(|h| self.slab.get(h))
            .map(|node| node.value)
    }

    /// Iterate over the values head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.slab, self.head)
    }

    // ── Cursors ────────────────────────────────────────────────────

    /// Create a cursor positioned at `start`.
    ///
    /// Fails with [`ListError::OutOfBounds`] if `start >= len()` (so always
    /// on an empty list), or with [`ListError::AllocationFailed`] if the
    /// allocator refuses the cursor record.
    pub fn cursor(&self, start: usize) -> Result<Cursor, ListError> {
        let len = self.len();
        let (handle, node) = Links::new(&self.slab, self.head)
            .nth(start)
            .ok_or(ListError::OutOfBounds { index: start, len })?;
        let record = Record::allocate(
            self.record.allocator(),
            AllocRequest::of::<Cursor>(RecordKind::Iterator),
        )?;
        Ok(Cursor::new(
            self.id,
            handle,
            start,
            node.value,
            self.generation,
            record,
        ))
    }

    /// Move `cursor` to the next node.
    ///
    /// Checks, in order: that the cursor belongs to this list
    /// ([`ListError::ForeignCursor`]), that the list has not changed
    /// structure since the cursor last moved ([`ListError::StaleCursor`]),
    /// and that the cursor is not already exhausted. When there is no next
    /// node the cursor becomes exhausted, keeps its index and value, and
    /// this call returns [`ListError::Exhausted`]; so does every later one.
    pub fn advance(&self, cursor: &mut Cursor) -> Result<(), ListError> {
        let current = self.validate(cursor)?;
        if cursor.is_exhausted() {
            return Err(ListError::Exhausted);
        }
        let Some(next) = current.next else {
            cursor.exhaust();
            return Err(ListError::Exhausted);
        };
        let value = self
            .slab
            .get(next)
            .map(|node| node.value)
            .ok_or_else(|| self.stale(cursor))?;
        cursor.step(next, value);
        Ok(())
    }

    /// Read the live value under `cursor`.
    ///
    /// Unlike [`Cursor::value`], this sees updates made with
    /// [`set`](Self::set) after the cursor reached the node.
    pub fn current(&self, cursor: &Cursor) -> Result<Value, ListError> {
        self.validate(cursor).map(|node| node.value)
    }

    // ── Observability ──────────────────────────────────────────────

    /// Point-in-time counters for this list.
    pub fn metrics(&self) -> ListMetrics {
        ListMetrics {
            len: self.len(),
            generation: self.generation,
            node_slots: self.slab.total_slots(),
            free_slots: self.slab.free_count(),
            node_allocations: self.counters.node_allocations,
            node_releases: self.counters.node_releases,
            failed_allocations: self.counters.failed_allocations,
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn alloc_node(&mut self, node: Node) -> Result<NodeHandle, ListError> {
        let allocator: &dyn Allocator = &**self.record.allocator();
        match self.slab.alloc(node, allocator) {
            Ok(handle) => {
                self.counters.node_allocations += 1;
                Ok(handle)
            }
            Err(e) => {
                if matches!(e, ArenaError::AllocationFailed(_)) {
                    self.counters.failed_allocations += 1;
                }
                Err(e.into())
            }
        }
    }

    fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        Links::new(&self.slab, self.head)
            .nth(index)
            .map(|(handle, _)| handle)
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn stale(&self, cursor: &Cursor) -> ListError {
        ListError::StaleCursor {
            cursor_generation: cursor.generation(),
            list_generation: self.generation,
        }
    }

    fn validate(&self, cursor: &Cursor) -> Result<&Node, ListError> {
        if cursor.list_id() != self.id {
            return Err(ListError::ForeignCursor {
                cursor_list: cursor.list_id(),
                list: self.id,
            });
        }
        if cursor.generation() != self.generation {
            return Err(self.stale(cursor));
        }
        self.slab.get(cursor.node()).ok_or_else(|| self.stale(cursor))
    }
}

impl Drop for List {
    fn drop(&mut self) {
        self.slab.release_all(&**self.record.allocator());
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("values", &DebugValues(self))
            .finish()
    }
}

struct DebugValues<'a>(&'a List);

impl fmt::Debug for DebugValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
