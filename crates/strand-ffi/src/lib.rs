//! C FFI bindings for the Strand linked list.
//!
//! Lists and iterators cross the boundary as opaque `u64` handles
//! (slot index plus one in the upper 32 bits, generation in the lower 32).
//! No handle is ever 0, so C callers can use 0 to mean "no handle". Every
//! function returns a [`StrandStatus`] as `i32` and writes results through
//! out-pointers. The header `include/strand.h` is generated by cbindgen.
//!
//! Allocation goes through the process-wide registry in [`registry`]:
//! register a C `malloc`/`free` pair once, and every list, node, and
//! iterator created afterwards is allocated through it.
//!
//! This is the only crate in the workspace that contains `unsafe` code,
//! limited to writing through caller-provided out-pointers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a panic into `StrandStatus::Panicked`.
///
/// `return` inside the body returns from the guarded closure, so bodies
/// can early-return a status.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => $crate::status::StrandStatus::Panicked as i32,
        }
    };
}

/// Lock a handle table, returning `StrandStatus::InternalError` from
/// the enclosing guarded body if the lock is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::StrandStatus::InternalError as i32,
        }
    };
}

mod handle;
pub mod iterator;
pub mod list;
pub mod registry;
pub mod status;

pub use iterator::{
    strand_iterator_create, strand_iterator_destroy, strand_iterator_index,
    strand_iterator_next, strand_iterator_value,
};
pub use list::{
    strand_list_create, strand_list_destroy, strand_list_find, strand_list_insert,
    strand_list_insert_end, strand_list_insert_front, strand_list_len,
};
pub use registry::{
    strand_register_allocate, strand_register_release, StrandAllocateFn, StrandReleaseFn,
};
pub use status::StrandStatus;
