//! Iterator FFI: create, next, destroy, value, index.
//!
//! An FFI iterator is a [`Cursor`] paired with the handle of the list it
//! came from. Advancing resolves that list handle first, so an iterator
//! whose list has been destroyed reports `INVALID_HANDLE`, and one whose
//! list changed structure reports `STALE_ITERATOR`.
//!
//! Like lists, each iterator sits behind its own mutex and `ITERATORS` is
//! locked only for handle lookup. An iterator's mutex is taken before its
//! list's. Creating an iterator allocates with only the list's mutex held.

use std::sync::{Arc, Mutex};

use strand::Cursor;

use crate::handle::HandleTable;
use crate::list::{get_list, list_exists};
use crate::status::StrandStatus;

struct IteratorEntry {
    list: u64,
    cursor: Cursor,
}

type IteratorArc = Arc<Mutex<IteratorEntry>>;

static ITERATORS: Mutex<HandleTable<IteratorArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for an iterator handle, briefly locking the global table.
fn get_iterator(iterator: u64) -> Result<IteratorArc, StrandStatus> {
    let table = ITERATORS.lock().map_err(|_| StrandStatus::InternalError)?;
    table.get(iterator).cloned().ok_or(StrandStatus::InvalidHandle)
}

/// Create an iterator positioned at element `start` of `list`.
///
/// Fails with `OUT_OF_BOUNDS` if `start` is not less than the list length,
/// which includes every `start` on an empty list.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_iterator_create(list: u64, start: usize, iterator_out: *mut u64) -> i32 {
    ffi_guard!({
        if iterator_out.is_null() {
            return StrandStatus::InvalidArgument as i32;
        }
        let arc = match get_list(list) {
            Ok(arc) => arc,
            Err(status) => return status as i32,
        };
        let created = ffi_lock!(arc).cursor(start);
        let cursor = match created {
            Ok(cursor) => cursor,
            Err(e) => return StrandStatus::from(&e) as i32,
        };
        let entry = Arc::new(Mutex::new(IteratorEntry { list, cursor }));
        let inserted = ffi_lock!(ITERATORS).insert(entry);
        // A rejected value is dropped here, after the table lock is gone.
        let Ok(handle) = inserted else {
            return StrandStatus::CapacityExceeded as i32;
        };
        // SAFETY: iterator_out is non-null and valid per caller contract.
        unsafe { *iterator_out = handle };
        StrandStatus::Ok as i32
    })
}

/// Move the iterator to the next element.
///
/// Returns `EXHAUSTED` when there is no next element; the iterator then
/// keeps its last index and value and every later call returns
/// `EXHAUSTED` again.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_iterator_next(iterator: u64) -> i32 {
    ffi_guard!({
        let it = match get_iterator(iterator) {
            Ok(it) => it,
            Err(status) => return status as i32,
        };
        let mut entry = ffi_lock!(it);
        let arc = match get_list(entry.list) {
            Ok(arc) => arc,
            Err(status) => return status as i32,
        };
        let l = ffi_lock!(arc);
        StrandStatus::from(l.advance(&mut entry.cursor)) as i32
    })
}

/// Destroy an iterator. The list it walks is not affected.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_iterator_destroy(iterator: u64) -> i32 {
    ffi_guard!({
        // Drop outside the lock: releasing calls into the C allocator.
        let removed = ffi_lock!(ITERATORS).remove(iterator);
        match removed {
            Some(_) => StrandStatus::Ok as i32,
            None => StrandStatus::InvalidHandle as i32,
        }
    })
}

/// Read the iterator's entry, checking that its list still exists.
#[allow(unsafe_code)]
fn read<T: Copy>(iterator: u64, out: *mut T, f: impl FnOnce(&Cursor) -> T) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return StrandStatus::InvalidArgument as i32;
        }
        let it = match get_iterator(iterator) {
            Ok(it) => it,
            Err(status) => return status as i32,
        };
        let entry = ffi_lock!(it);
        match list_exists(entry.list) {
            Ok(true) => {}
            Ok(false) => return StrandStatus::InvalidHandle as i32,
            Err(status) => return status as i32,
        }
        let value = f(&entry.cursor);
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = value };
        StrandStatus::Ok as i32
    })
}

/// Write the value of the element the iterator is on to `value_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_iterator_value(iterator: u64, value_out: *mut u64) -> i32 {
    read(iterator, value_out, Cursor::value)
}

/// Write the 0-based index of the element the iterator is on to
/// `index_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_iterator_index(iterator: u64, index_out: *mut usize) -> i32 {
    read(iterator, index_out, Cursor::index)
}
