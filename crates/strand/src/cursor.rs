//! Detached, generation-checked cursors.
//!
//! A [`Cursor`] remembers a position inside a list without borrowing it:
//! the node handle, a snapshot of that node's value, its 0-based index,
//! and the list generation at the time it was created or last advanced.
//! The list validates all of that on every use, so a cursor that outlives
//! a structural change fails with
//! [`ListError::StaleCursor`](crate::ListError::StaleCursor) instead of
//! reading a node that has moved.
//!
//! ```text
//!   cursor(start) ──► Positioned ──advance, successor──► Positioned
//!                         │
//!                         └──advance, no successor──► Exhausted (terminal)
//! ```

use strand_arena::NodeHandle;
use strand_core::{ListId, Record, Value};

/// Where a cursor stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// On a node; `index()` and `value()` describe it.
    Positioned,
    /// An advance found no successor. `index()` and `value()` still
    /// describe the last node visited.
    Exhausted,
}

/// A position inside a [`List`](crate::List).
///
/// Created by [`List::cursor`](crate::List::cursor) and moved by
/// [`List::advance`](crate::List::advance). The cursor owns one allocation
/// of its own, granted by the list's allocator and returned when the
/// cursor is dropped; it never owns or releases nodes.
#[derive(Debug)]
pub struct Cursor {
    list: ListId,
    node: NodeHandle,
    index: usize,
    value: Value,
    generation: u64,
    state: CursorState,
    _record: Record,
}

impl Cursor {
    pub(crate) fn new(
        list: ListId,
        node: NodeHandle,
        index: usize,
        value: Value,
        generation: u64,
        record: Record,
    ) -> Self {
        Self {
            list,
            node,
            index,
            value,
            generation,
            state: CursorState::Positioned,
            _record: record,
        }
    }

    /// 0-based offset of the current node from the head.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the current node when the cursor reached it.
    pub fn value(&self) -> Value {
        self.value
    }

    /// Current state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Whether an advance has run off the end.
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// The list this cursor belongs to.
    pub fn list_id(&self) -> ListId {
        self.list
    }

    /// The list generation this cursor was last validated against.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn node(&self) -> NodeHandle {
        self.node
    }

    pub(crate) fn step(&mut self, node: NodeHandle, value: Value) {
        self.node = node;
        self.value = value;
        self.index += 1;
    }

    pub(crate) fn exhaust(&mut self) {
        self.state = CursorState::Exhausted;
    }
}
