//! Core types and the allocator seam for the Strand linked list.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! element type, list identifiers, the [`Allocator`] trait every list and
//! cursor allocates through, and the allocation error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod error;
pub mod id;

pub use alloc::{
    AllocRequest, Allocation, Allocator, RecordKind, Record, SharedAllocator, SystemAllocator,
};
pub use error::AllocError;
pub use id::{ListId, Value};
