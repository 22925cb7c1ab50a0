//! Generational node slab backing Strand lists.
//!
//! A list's nodes are not individually heap-allocated and linked by
//! pointer. They live in a [`NodeSlab`]: a `Vec` of slots addressed by
//! [`NodeHandle`]s that pair a slot index with the slot's generation.
//!
//! ```text
//! NodeSlab
//! ├── slots: Vec<Slot>      (generation + optional live node)
//! ├── free_list: Vec<u32>   (released slots, reused LIFO)
//! └── ArenaConfig           (initial capacity, node limit)
//! ```
//!
//! Every node allocation is first granted by the caller's
//! [`Allocator`](strand_core::Allocator); the grant is stored beside the
//! node and handed back when the slot is released. Releasing a slot bumps
//! its generation so handles to it go stale instead of aliasing whatever
//! is stored there next.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod slab;

pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::NodeHandle;
pub use slab::{Node, NodeSlab};
