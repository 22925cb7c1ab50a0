//! Strand: a singly linked list of `u64` values with an injectable
//! allocator and generation-checked cursors.
//!
//! Every record a list needs (its own header, each node, each cursor) is
//! granted by an [`Allocator`]. Lists default to the [`SystemAllocator`];
//! pass any other implementation to [`List::new_in`] to count, limit, or
//! fail allocations.
//!
//! # Quick start
//!
//! ```rust
//! use strand::prelude::*;
//!
//! let mut list = List::new().unwrap();
//! for v in [10, 20, 40] {
//!     list.insert_end(v).unwrap();
//! }
//! list.insert(2, 30).unwrap();
//! assert_eq!(list.find(30), Ok(2));
//! assert_eq!(list.find(99), Err(ListError::NotFound));
//!
//! let mut cursor = list.cursor(1).unwrap();
//! let mut seen = vec![cursor.value()];
//! while list.advance(&mut cursor).is_ok() {
//!     seen.push(cursor.value());
//! }
//! assert_eq!(seen, vec![20, 30, 40]);
//! assert!(cursor.is_exhausted());
//! ```
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `strand-core` | [`Value`], [`ListId`], the [`Allocator`] seam, [`AllocError`] |
//! | `strand-arena` | [`arena::NodeSlab`], the generational node storage |
//! | `strand` | [`List`], [`Cursor`], [`ListError`], [`ListConfig`] |
//! | `strand-ffi` | C ABI over lists and cursors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
pub mod metrics;

/// Node storage (`strand-arena`).
pub use strand_arena as arena;

pub use config::{ConfigError, ListConfig};
pub use cursor::{Cursor, CursorState};
pub use error::ListError;
pub use iter::Iter;
pub use list::List;
pub use metrics::ListMetrics;
pub use strand_core::{
    AllocError, AllocRequest, Allocation, Allocator, ListId, RecordKind, SharedAllocator,
    SystemAllocator, Value,
};

/// Common imports for typical usage.
///
/// ```rust
/// use strand::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Allocator, Cursor, CursorState, List, ListConfig, ListError, SharedAllocator,
        SystemAllocator, Value,
    };
}
