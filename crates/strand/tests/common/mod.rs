//! List-building helpers shared by the integration tests.

#![allow(dead_code)]

use strand::{List, ListError, SharedAllocator, Value};

/// A list holding `values` in order, built with `insert_end`.
pub fn list_of(values: &[Value]) -> List {
    list_of_in(values, strand::SystemAllocator::shared())
}

/// Like [`list_of`], allocating through `allocator`.
pub fn list_of_in(values: &[Value], allocator: SharedAllocator) -> List {
    let mut list = List::new_in(allocator).unwrap();
    for &v in values {
        list.insert_end(v).unwrap();
    }
    list
}

/// Every `(index, value)` a cursor from `start` visits before exhausting.
pub fn collect_via_cursor(list: &List, start: usize) -> Result<Vec<(usize, Value)>, ListError> {
    let mut cursor = list.cursor(start)?;
    let mut seen = vec![(cursor.index(), cursor.value())];
    loop {
        match list.advance(&mut cursor) {
            Ok(()) => seen.push((cursor.index(), cursor.value())),
            Err(ListError::Exhausted) => return Ok(seen),
            Err(e) => return Err(e),
        }
    }
}
