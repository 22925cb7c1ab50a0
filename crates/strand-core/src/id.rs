//! The element type and list instance identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The scalar stored in every list node.
pub type Value = u64;

/// Counter for unique [`ListId`] allocation.
static LIST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a list.
///
/// Allocated from a monotonic atomic counter via [`ListId::next`]. Two
/// distinct lists always have different IDs, even when one is dropped and
/// the other reuses its memory. Cursors carry the ID of the list that
/// created them so a cursor presented to the wrong list is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(u64);

impl ListId {
    /// Allocate a fresh, unique list ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(LIST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
