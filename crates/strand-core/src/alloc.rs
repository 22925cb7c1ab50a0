//! The allocator seam.
//!
//! Every list record, node, and cursor is allocated through an
//! [`Allocator`] supplied when the list is constructed. Node payloads live
//! in the list's slab; the allocator decides whether each record may exist
//! and is told when it goes away, which is what lets tests inject failing
//! or counting providers and lets the C ABI route requests to a
//! caller-registered `malloc`/`free` pair.
//!
//! There is no process-wide allocator state in this crate. Lists built with
//! different allocators are fully independent.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::AllocError;

/// Which kind of record an allocation backs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// The list header itself.
    List,
    /// A single list cell.
    Node,
    /// A cursor positioned inside a list.
    Iterator,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Node => write!(f, "node"),
            Self::Iterator => write!(f, "iterator"),
        }
    }
}

/// A request presented to an [`Allocator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocRequest {
    /// The kind of record being allocated.
    pub kind: RecordKind,
    /// Size of the record in bytes.
    pub size: usize,
}

impl AllocRequest {
    /// Build a request for a record of the given kind and size.
    pub fn new(kind: RecordKind, size: usize) -> Self {
        Self { kind, size }
    }

    /// Build a request sized for `T`.
    pub fn of<T>(kind: RecordKind) -> Self {
        Self::new(kind, std::mem::size_of::<T>())
    }
}

/// A granted allocation.
///
/// The `token` is provider-defined (an address for C providers, a serial
/// number for the system provider). An `Allocation` is not
/// `Clone`: it must be handed back to the allocator that produced it
/// exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Allocation {
    request: AllocRequest,
    token: usize,
}

impl Allocation {
    /// Create an allocation record. Called by [`Allocator`] implementations.
    pub fn new(request: AllocRequest, token: usize) -> Self {
        Self { request, token }
    }

    /// The request this allocation satisfied.
    pub fn request(&self) -> AllocRequest {
        self.request
    }

    /// The kind of record this allocation backs.
    pub fn kind(&self) -> RecordKind {
        self.request.kind
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.request.size
    }

    /// The provider-defined token.
    pub fn token(&self) -> usize {
        self.token
    }
}

/// A provider of allocations for lists, nodes, and cursors.
///
/// Implementations must be shareable across threads because a list may be
/// moved to another thread together with its allocator. Methods take
/// `&self`; providers that keep state use atomics or a lock internally.
pub trait Allocator: Send + Sync {
    /// Grant or refuse an allocation.
    fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError>;

    /// Return an allocation previously granted by this allocator.
    fn release(&self, allocation: Allocation);
}

/// Shared handle to an allocator, passed into list construction.
pub type SharedAllocator = Arc<dyn Allocator>;

/// Default provider: grants every request.
///
/// Node storage is owned by the list's slab on the global heap, so this
/// provider only hands out serial tokens.
#[derive(Debug)]
pub struct SystemAllocator {
    next_token: AtomicUsize,
}

impl SystemAllocator {
    /// Create a new system allocator.
    pub fn new() -> Self {
        Self {
            next_token: AtomicUsize::new(1),
        }
    }

    /// Create a new system allocator behind a [`SharedAllocator`].
    pub fn shared() -> SharedAllocator {
        Arc::new(Self::new())
    }
}

impl Default for SystemAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for SystemAllocator {
    fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError> {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        Ok(Allocation::new(request, token))
    }

    fn release(&self, _allocation: Allocation) {}
}

/// An allocation that releases itself when dropped.
///
/// Lists and cursors each hold one `Record` for their own header, so
/// dropping them returns that allocation to the allocator that granted it.
pub struct Record {
    allocator: SharedAllocator,
    request: AllocRequest,
    allocation: Option<Allocation>,
}

impl Record {
    /// Allocate a record through `allocator`.
    pub fn allocate(allocator: &SharedAllocator, request: AllocRequest) -> Result<Self, AllocError> {
        let allocation = allocator.allocate(request)?;
        Ok(Self {
            allocator: Arc::clone(allocator),
            request,
            allocation: Some(allocation),
        })
    }

    /// The kind of record held.
    pub fn kind(&self) -> RecordKind {
        self.request.kind
    }

    /// The allocator the record will be released to.
    pub fn allocator(&self) -> &SharedAllocator {
        &self.allocator
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("request", &self.request)
            .field("allocation", &self.allocation)
            .finish()
    }
}

impl Drop for Record {
    fn drop(&mut self) {
        if let Some(allocation) = self.allocation.take() {
            self.allocator.release(allocation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every release so tests can see what a `Record` hands back.
    #[derive(Default)]
    struct Recorder {
        released: Mutex<Vec<(RecordKind, usize)>>,
    }

    impl Allocator for Recorder {
        fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError> {
            Ok(Allocation::new(request, 7))
        }

        fn release(&self, allocation: Allocation) {
            self.released
                .lock()
                .unwrap()
                .push((allocation.kind(), allocation.token()));
        }
    }

    struct Refuser;

    impl Allocator for Refuser {
        fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError> {
            Err(AllocError::new(request.kind, request.size))
        }

        fn release(&self, _allocation: Allocation) {
            panic!("nothing was granted");
        }
    }

    #[test]
    fn request_of_uses_type_size() {
        let r = AllocRequest::of::<[u64; 3]>(RecordKind::Node);
        assert_eq!(r.size, 24);
        assert_eq!(r.kind, RecordKind::Node);
    }

    #[test]
    fn system_allocator_tokens_are_unique() {
        let sys = SystemAllocator::new();
        let a = sys.allocate(AllocRequest::new(RecordKind::Node, 8)).unwrap();
        let b = sys.allocate(AllocRequest::new(RecordKind::Node, 8)).unwrap();
        assert_ne!(a.token(), b.token());
        sys.release(a);
        sys.release(b);
    }

    #[test]
    fn record_releases_on_drop() {
        let recorder = Arc::new(Recorder::default());
        let shared: SharedAllocator = recorder.clone();
        let record =
            Record::allocate(&shared, AllocRequest::new(RecordKind::Iterator, 32)).unwrap();
        assert_eq!(record.kind(), RecordKind::Iterator);
        assert!(recorder.released.lock().unwrap().is_empty());
        drop(record);
        assert_eq!(
            *recorder.released.lock().unwrap(),
            vec![(RecordKind::Iterator, 7)]
        );
    }

    #[test]
    fn refused_record_reports_request() {
        let shared: SharedAllocator = Arc::new(Refuser);
        let err = Record::allocate(&shared, AllocRequest::new(RecordKind::List, 48)).unwrap_err();
        assert_eq!(err, AllocError::new(RecordKind::List, 48));
    }

    #[test]
    fn record_kind_display() {
        assert_eq!(RecordKind::List.to_string(), "list");
        assert_eq!(RecordKind::Node.to_string(), "node");
        assert_eq!(RecordKind::Iterator.to_string(), "iterator");
    }
}
