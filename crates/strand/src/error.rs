//! List and cursor error types.
//!
//! Every fallible list operation reports one [`ListError`]. Each failure
//! cause has its own variant, so callers never have to decode a shared
//! `false` or a reserved index.

use std::error::Error;
use std::fmt;

use strand_arena::ArenaError;
use strand_core::{AllocError, ListId, RecordKind};

use crate::config::ConfigError;

/// Errors from list and cursor operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// The allocator refused a record.
    AllocationFailed {
        /// The kind of record that could not be allocated.
        kind: RecordKind,
    },
    /// An index lies outside the list.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },
    /// No node holds the requested value.
    NotFound,
    /// The cursor was created by a different list.
    ForeignCursor {
        /// The list the cursor belongs to.
        cursor_list: ListId,
        /// The list it was presented to.
        list: ListId,
    },
    /// The list changed structure after the cursor was created or last
    /// advanced.
    StaleCursor {
        /// The list generation stamped on the cursor.
        cursor_generation: u64,
        /// The list's current generation.
        list_generation: u64,
    },
    /// The cursor is past the last node.
    Exhausted,
    /// The list is at its configured node limit.
    CapacityExceeded {
        /// The configured limit.
        capacity: usize,
    },
    /// The list configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { kind } => write!(f, "{kind} allocation failed"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }
            Self::NotFound => write!(f, "value not found"),
            Self::ForeignCursor { cursor_list, list } => {
                write!(f, "cursor belongs to list {cursor_list}, not list {list}")
            }
            Self::StaleCursor {
                cursor_generation,
                list_generation,
            } => {
                write!(
                    f,
                    "stale cursor: generation {cursor_generation}, list at {list_generation}"
                )
            }
            Self::Exhausted => write!(f, "cursor exhausted"),
            Self::CapacityExceeded { capacity } => {
                write!(f, "list capacity of {capacity} nodes exceeded")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AllocError> for ListError {
    fn from(e: AllocError) -> Self {
        Self::AllocationFailed { kind: e.kind }
    }
}

impl From<ArenaError> for ListError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::CapacityExceeded { capacity, .. } => Self::CapacityExceeded { capacity },
            ArenaError::AllocationFailed(alloc) => Self::from(alloc),
        }
    }
}

impl From<ConfigError> for ListError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
