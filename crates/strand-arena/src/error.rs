//! Slab-specific error types.

use std::error::Error;
use std::fmt;

use strand_core::AllocError;

/// Errors that can occur during slab operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The slab already holds its configured maximum of live nodes.
    CapacityExceeded {
        /// Number of live nodes the caller asked for.
        requested: usize,
        /// The configured limit.
        capacity: usize,
    },
    /// The allocator refused the node allocation.
    AllocationFailed(AllocError),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "slab capacity exceeded: requested {requested} nodes, capacity {capacity}"
                )
            }
            Self::AllocationFailed(e) => write!(f, "node allocation failed: {e}"),
        }
    }
}

impl Error for ArenaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailed(e) => Some(e),
            Self::CapacityExceeded { .. } => None,
        }
    }
}

impl From<AllocError> for ArenaError {
    fn from(e: AllocError) -> Self {
        Self::AllocationFailed(e)
    }
}
