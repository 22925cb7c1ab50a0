//! Allocation error type shared by every layer above the allocator seam.

use std::error::Error;
use std::fmt;

use crate::alloc::RecordKind;

/// An [`Allocator`](crate::Allocator) refused a request.
///
/// Carries the request that was refused so callers further up can report
/// which record (list, node, or cursor) could not be allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError {
    /// The kind of record that was being allocated.
    pub kind: RecordKind,
    /// Size of the refused request in bytes.
    pub size: usize,
}

impl AllocError {
    /// Build an error for a refused request.
    pub fn new(kind: RecordKind, size: usize) -> Self {
        Self { kind, size }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocation of {} record ({} bytes) refused",
            self.kind, self.size
        )
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_kind_and_size() {
        let e = AllocError::new(RecordKind::Node, 24);
        assert_eq!(e.to_string(), "allocation of node record (24 bytes) refused");
    }
}
