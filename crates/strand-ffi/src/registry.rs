//! Process-wide allocator registration for C callers.
//!
//! C code cannot implement [`Allocator`], so the FFI keeps one registry of
//! plain function pointers and builds every list through
//! [`RegistryAllocator`], which forwards to whatever is registered at the
//! moment of each request. Until a function is registered, requests are
//! granted without calling out and releases are dropped.
//!
//! Each grant remembers the pointer the C allocator returned, and is
//! handed back to the release function registered at release time.

use std::ffi::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use strand_core::{AllocError, AllocRequest, Allocation, Allocator, SharedAllocator};

use crate::status::StrandStatus;

/// C allocation callback: return a block of at least `size` bytes, or null.
pub type StrandAllocateFn = extern "C" fn(size: usize) -> *mut c_void;

/// C release callback: receives a pointer previously returned by the
/// registered [`StrandAllocateFn`].
pub type StrandReleaseFn = extern "C" fn(ptr: *mut c_void);

#[derive(Clone, Copy)]
struct Registry {
    allocate: Option<StrandAllocateFn>,
    release: Option<StrandReleaseFn>,
}

static REGISTRY: Mutex<Registry> = Mutex::new(Registry {
    allocate: None,
    release: None,
});

/// Token for grants made while no allocate function was registered.
const UNREGISTERED: usize = 0;

// The registry holds two `Copy` function pointers, so a poisoned lock
// still guards consistent data.
fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Forwards every request to the registered C functions.
#[derive(Debug, Default)]
pub struct RegistryAllocator {
    granted: AtomicUsize,
    refused: AtomicUsize,
}

impl RegistryAllocator {
    /// Grants made through this allocator.
    pub fn granted(&self) -> usize {
        self.granted.load(Ordering::Relaxed)
    }

    /// Requests refused because the C allocator returned null.
    pub fn refused(&self) -> usize {
        self.refused.load(Ordering::Relaxed)
    }
}

impl Allocator for RegistryAllocator {
    fn allocate(&self, request: AllocRequest) -> Result<Allocation, AllocError> {
        let allocate = registry().allocate;
        let token = match allocate {
            Some(f) => {
                let ptr = f(request.size);
                if ptr.is_null() {
                    self.refused.fetch_add(1, Ordering::Relaxed);
                    return Err(AllocError::new(request.kind, request.size));
                }
                ptr as usize
            }
            None => UNREGISTERED,
        };
        self.granted.fetch_add(1, Ordering::Relaxed);
        Ok(Allocation::new(request, token))
    }

    fn release(&self, allocation: Allocation) {
        if allocation.token() == UNREGISTERED {
            return;
        }
        let release = registry().release;
        if let Some(f) = release {
            f(allocation.token() as *mut c_void);
        }
    }
}

/// The allocator every FFI-created list is built with.
pub(crate) fn shared() -> SharedAllocator {
    static SHARED: std::sync::OnceLock<Arc<RegistryAllocator>> = std::sync::OnceLock::new();
    let allocator = SHARED.get_or_init(|| Arc::new(RegistryAllocator::default()));
    Arc::clone(allocator) as SharedAllocator
}

/// Register the allocation function used by all later list, node, and
/// iterator allocations. Pass null to go back to the built-in provider.
///
/// The callback runs with the allocating list locked and no handle table
/// locked. It may call any `strand_*` function except on that list.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_register_allocate(allocate: Option<StrandAllocateFn>) -> i32 {
    ffi_guard!({
        registry().allocate = allocate;
        StrandStatus::Ok as i32
    })
}

/// Register the release function used by all later releases. Pass null
/// to stop forwarding releases.
///
/// Releases happen after the list or iterator has left its handle table,
/// so the callback may call any `strand_*` function.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_register_release(release: Option<StrandReleaseFn>) -> i32 {
    ffi_guard!({
        registry().release = release;
        StrandStatus::Ok as i32
    })
}
