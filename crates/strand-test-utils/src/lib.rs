//! Test allocators and fixtures for Strand development.
//!
//! Provides [`Allocator`](strand_core::Allocator) implementations that
//! refuse on demand ([`FailingAllocator`]) or keep a ledger of every grant
//! and release ([`CountingAllocator`]), plus value sequences shared by the
//! unit tests, integration tests, and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod fixtures;

pub use alloc::{CountingAllocator, FailingAllocator};
pub use fixtures::{ascending, with_duplicates};
