//! List lifecycle FFI: create, destroy, insert, find, len.
//!
//! Each list sits behind its own `Arc<Mutex<List>>`, so the global `LISTS`
//! table is locked only for handle lookup. Allocator callbacks run with
//! just the one list's mutex held and may call back into the library for
//! any other list.
//!
//! Neither global table is held while another lock is taken. The only
//! nesting is an iterator's mutex around its list's mutex.

use std::sync::{Arc, Mutex};

use strand::List;

use crate::handle::HandleTable;
use crate::registry;
use crate::status::StrandStatus;

pub(crate) type ListArc = Arc<Mutex<List>>;

static LISTS: Mutex<HandleTable<ListArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for a list handle, briefly locking the global table.
pub(crate) fn get_list(list: u64) -> Result<ListArc, StrandStatus> {
    let table = LISTS.lock().map_err(|_| StrandStatus::InternalError)?;
    table.get(list).cloned().ok_or(StrandStatus::InvalidHandle)
}

/// Whether `list` still names a live list.
pub(crate) fn list_exists(list: u64) -> Result<bool, StrandStatus> {
    let table = LISTS.lock().map_err(|_| StrandStatus::InternalError)?;
    Ok(table.contains(list))
}

/// Create an empty list allocated through the registered allocator.
///
/// On success writes the list handle to `list_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_create(list_out: *mut u64) -> i32 {
    ffi_guard!({
        if list_out.is_null() {
            return StrandStatus::InvalidArgument as i32;
        }
        let list = match List::new_in(registry::shared()) {
            Ok(list) => Arc::new(Mutex::new(list)),
            Err(e) => return StrandStatus::from(&e) as i32,
        };
        let inserted = ffi_lock!(LISTS).insert(list);
        // A rejected value is dropped here, after the table lock is gone.
        let Ok(handle) = inserted else {
            return StrandStatus::CapacityExceeded as i32;
        };
        // SAFETY: list_out is non-null and valid per caller contract.
        unsafe { *list_out = handle };
        StrandStatus::Ok as i32
    })
}

/// Destroy a list, releasing every node and then the list itself.
///
/// Iterators created from the list stay allocated until destroyed, but
/// every call on them other than destroy reports `INVALID_HANDLE`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_destroy(list: u64) -> i32 {
    ffi_guard!({
        // Drop outside the lock: releasing calls into the C allocator.
        let removed = ffi_lock!(LISTS).remove(list);
        match removed {
            Some(_) => StrandStatus::Ok as i32,
            None => StrandStatus::InvalidHandle as i32,
        }
    })
}

/// Run `f` on the list behind `list` with only that list locked.
fn with_list(list: u64, f: impl FnOnce(&mut List) -> i32) -> i32 {
    ffi_guard!({
        let arc = match get_list(list) {
            Ok(arc) => arc,
            Err(status) => return status as i32,
        };
        let mut l = ffi_lock!(arc);
        f(&mut l)
    })
}

/// Insert `value` at the head.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_insert_front(list: u64, value: u64) -> i32 {
    with_list(list, |l| StrandStatus::from(l.insert_front(value)) as i32)
}

/// Insert `value` at the tail.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_insert_end(list: u64, value: u64) -> i32 {
    with_list(list, |l| StrandStatus::from(l.insert_end(value)) as i32)
}

/// Insert `value` so it lands at `index`. `index` may equal the length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_insert(list: u64, index: usize, value: u64) -> i32 {
    with_list(list, |l| StrandStatus::from(l.insert(index, value)) as i32)
}

/// Find the first element equal to `value`, writing its index to
/// `index_out`. Returns `NOT_FOUND` if no element matches.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_find(list: u64, value: u64, index_out: *mut usize) -> i32 {
    if index_out.is_null() {
        return StrandStatus::InvalidArgument as i32;
    }
    with_list(list, |l| match l.find(value) {
        Ok(index) => {
            // SAFETY: index_out is non-null and valid per caller contract.
            unsafe { *index_out = index };
            StrandStatus::Ok as i32
        }
        Err(e) => StrandStatus::from(&e) as i32,
    })
}

/// Write the number of elements to `len_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn strand_list_len(list: u64, len_out: *mut usize) -> i32 {
    if len_out.is_null() {
        return StrandStatus::InvalidArgument as i32;
    }
    with_list(list, |l| {
        // SAFETY: len_out is non-null and valid per caller contract.
        unsafe { *len_out = l.len() };
        StrandStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> u64 {
        let mut h = 0u64;
        assert_eq!(strand_list_create(&mut h), StrandStatus::Ok as i32);
        h
    }

    fn len(h: u64) -> usize {
        let mut n = usize::MAX;
        assert_eq!(strand_list_len(h, &mut n), StrandStatus::Ok as i32);
        n
    }

    #[test]
    fn create_insert_find_destroy() {
        let h = create();
        for v in [2, 3] {
            assert_eq!(strand_list_insert_end(h, v), StrandStatus::Ok as i32);
        }
        assert_eq!(strand_list_insert_front(h, 1), StrandStatus::Ok as i32);
        assert_eq!(strand_list_insert(h, 3, 4), StrandStatus::Ok as i32);
        assert_eq!(len(h), 4);

        let mut idx = usize::MAX;
        assert_eq!(strand_list_find(h, 4, &mut idx), StrandStatus::Ok as i32);
        assert_eq!(idx, 3);
        assert_eq!(
            strand_list_find(h, 99, &mut idx),
            StrandStatus::NotFound as i32
        );
        assert_eq!(idx, 3);

        assert_eq!(strand_list_destroy(h), StrandStatus::Ok as i32);
    }

    #[test]
    fn insert_past_end_is_out_of_bounds() {
        let h = create();
        assert_eq!(
            strand_list_insert(h, 1, 0),
            StrandStatus::OutOfBounds as i32
        );
        assert_eq!(len(h), 0);
        strand_list_destroy(h);
    }

    #[test]
    fn destroyed_handle_is_invalid() {
        let h = create();
        assert_eq!(strand_list_destroy(h), StrandStatus::Ok as i32);
        assert_eq!(strand_list_destroy(h), StrandStatus::InvalidHandle as i32);
        assert_eq!(
            strand_list_insert_end(h, 1),
            StrandStatus::InvalidHandle as i32
        );
        let mut n = 0usize;
        assert_eq!(strand_list_len(h, &mut n), StrandStatus::InvalidHandle as i32);
    }

    #[test]
    fn null_out_pointers_rejected() {
        assert_eq!(
            strand_list_create(std::ptr::null_mut()),
            StrandStatus::InvalidArgument as i32
        );
        let h = create();
        assert_eq!(
            strand_list_find(h, 1, std::ptr::null_mut()),
            StrandStatus::InvalidArgument as i32
        );
        assert_eq!(
            strand_list_len(h, std::ptr::null_mut()),
            StrandStatus::InvalidArgument as i32
        );
        strand_list_destroy(h);
    }
}
