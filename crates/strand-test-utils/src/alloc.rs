//! Allocator doubles.
//!
//! - [`FailingAllocator`] grants everything until told to refuse, either
//!   once (optionally for one record kind) or after a fixed budget.
//! - [`CountingAllocator`] grants everything and records per-kind counts
//!   and the set of live allocations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use strand_core::{AllocError, AllocRequest, Allocation, Allocator, RecordKind, SystemAllocator};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn kind_index(kind: RecordKind) -> usize {
    match kind {
        RecordKind::List => 0,
        RecordKind::Node => 1,
        RecordKind::Iterator => 2,
    }
}

#[derive(Clone, Copy, Debug)]
enum Trigger {
    Any,
    Kind(RecordKind),
}

impl Trigger {
    fn matches(self, kind: RecordKind) -> bool {
        match self {
            Trigger::Any => true,
            Trigger::Kind(k) => k == kind,
        }
    }
}

/// Grants requests until armed to refuse.
///
/// [`fail_next`](Self::fail_next) refuses the next request of any kind;
/// [`fail_next_of`](Self::fail_next_of) refuses the next request of one
/// kind and lets others through. Both are one-shot. A budget set with
/// [`with_budget`](Self::with_budget) refuses every request after the
/// first `n` grants.
#[derive(Debug)]
pub struct FailingAllocator {
    inner: SystemAllocator,
    armed: Mutex<Option<Trigger>>,
    budget: AtomicUsize,
    refused: AtomicUsize,
    released: AtomicUsize,
}

impl FailingAllocator {
    pub fn new() -> Self {
        Self::with_budget(usize::MAX)
    }

    /// Grant the first `n` requests, then refuse all.
    pub fn with_budget(n: usize) -> Self {
        Self {
            inner: SystemAllocator::new(),
            armed: Mutex::new(None),
            budget: AtomicUsize::new(n),
            refused: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    /// Refuse the next request.
    pub fn fail_next(&self) {
        *lock(&self.armed) = Some(Trigger::Any);
    }

    /// Refuse the next request for a `kind` record.
    pub fn fail_next_of(&self, kind: RecordKind) {
        *lock(&self.armed) = Some(Trigger::Kind(kind));
    }

    /// Whether a one-shot refusal is still pending.
    pub fn is_armed(&self) -> bool {
        lock(&self.armed).is_some()
    }

    /// Requests refused so far.
    pub fn refused(&self) -> usize {
        self.refused.load(Ordering::Relaxed)
    }

    /// Allocations handed back so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }

    fn refuse(&self, request: AllocRequest) -> AllocError {
        self.refused.fetch_add(1, Ordering::Relaxed);
        AllocError::new(request.kind, request.size)
    }
}

impl Default for FailingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for FailingAllocator {
    fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError> {
        {
            let mut armed = lock(&self.armed);
            if armed.is_some_and(|t| t.matches(request.kind)) {
                *armed = None;
                return Err(self.refuse(request));
            }
        }
        let within_budget = self
            .budget
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| {
                match left {
                    usize::MAX => Some(usize::MAX),
                    0 => None,
                    n => Some(n - 1),
                }
            })
            .is_ok();
        if !within_budget {
            return Err(self.refuse(request));
        }
        self.inner.allocate(request)
    }

    fn release(&self, allocation: Allocation) {
        self.released.fetch_add(1, Ordering::Relaxed);
        self.inner.release(allocation);
    }
}

#[derive(Debug, Default)]
struct Ledger {
    next_token: usize,
    live: IndexMap<usize, AllocRequest>,
    allocated: [usize; 3],
    released: [usize; 3],
    unknown_releases: usize,
}

/// Grants every request and keeps a ledger.
///
/// Live allocations are kept in grant order, so tests can assert which
/// records are still outstanding and in what order they were made.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    ledger: Mutex<Ledger>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants of `kind` records so far.
    pub fn allocated(&self, kind: RecordKind) -> usize {
        lock(&self.ledger).allocated[kind_index(kind)]
    }

    /// Releases of `kind` records so far.
    pub fn released(&self, kind: RecordKind) -> usize {
        lock(&self.ledger).released[kind_index(kind)]
    }

    pub fn total_allocations(&self) -> usize {
        lock(&self.ledger).allocated.iter().sum()
    }

    pub fn total_releases(&self) -> usize {
        lock(&self.ledger).released.iter().sum()
    }

    /// Allocations granted and not yet released.
    pub fn live_count(&self) -> usize {
        lock(&self.ledger).live.len()
    }

    /// Kinds of the live allocations, oldest first.
    pub fn live_kinds(&self) -> Vec<RecordKind> {
        lock(&self.ledger).live.values().map(|r| r.kind).collect()
    }

    /// Releases of tokens this allocator never granted, or granted and
    /// already took back.
    pub fn unknown_releases(&self) -> usize {
        lock(&self.ledger).unknown_releases
    }
}

impl Allocator for CountingAllocator {
    fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError> {
        let mut ledger = lock(&self.ledger);
        ledger.next_token += 1;
        let token = ledger.next_token;
        ledger.live.insert(token, request);
        ledger.allocated[kind_index(request.kind)] += 1;
        Ok(Allocation::new(request, token))
    }

    fn release(&self, allocation: Allocation) {
        let mut ledger = lock(&self.ledger);
        if ledger.live.shift_remove(&allocation.token()).is_some() {
            ledger.released[kind_index(allocation.kind())] += 1;
        } else {
            ledger.unknown_releases += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> AllocRequest {
        AllocRequest::new(RecordKind::Node, 24)
    }

    #[test]
    fn fail_next_is_one_shot() {
        let a = FailingAllocator::new();
        a.fail_next();
        assert!(a.is_armed());
        assert!(a.allocate(node()).is_err());
        assert!(!a.is_armed());
        assert!(a.allocate(node()).is_ok());
        assert_eq!(a.refused(), 1);
    }

    #[test]
    fn fail_next_of_skips_other_kinds() {
        let a = FailingAllocator::new();
        a.fail_next_of(RecordKind::Iterator);
        assert!(a.allocate(node()).is_ok());
        let err = a
            .allocate(AllocRequest::new(RecordKind::Iterator, 8))
            .unwrap_err();
        assert_eq!(err.kind, RecordKind::Iterator);
        assert!(a.allocate(AllocRequest::new(RecordKind::Iterator, 8)).is_ok());
    }

    #[test]
    fn budget_refuses_after_n() {
        let a = FailingAllocator::with_budget(2);
        assert!(a.allocate(node()).is_ok());
        assert!(a.allocate(node()).is_ok());
        assert!(a.allocate(node()).is_err());
        assert!(a.allocate(node()).is_err());
        assert_eq!(a.refused(), 2);
    }

    #[test]
    fn counting_tracks_live_set() {
        let a = CountingAllocator::new();
        let first = a.allocate(AllocRequest::new(RecordKind::List, 64)).unwrap();
        let second = a.allocate(node()).unwrap();
        assert_eq!(a.live_kinds(), vec![RecordKind::List, RecordKind::Node]);

        a.release(first);
        assert_eq!(a.live_kinds(), vec![RecordKind::Node]);
        assert_eq!(a.released(RecordKind::List), 1);

        a.release(second);
        assert_eq!(a.live_count(), 0);
        assert_eq!(a.total_allocations(), 2);
        assert_eq!(a.total_releases(), 2);
        assert_eq!(a.unknown_releases(), 0);
    }

    #[test]
    fn counting_flags_foreign_release() {
        let a = CountingAllocator::new();
        a.release(Allocation::new(node(), 999));
        assert_eq!(a.unknown_releases(), 1);
        assert_eq!(a.total_releases(), 0);
    }
}
