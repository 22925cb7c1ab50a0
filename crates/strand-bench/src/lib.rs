//! Benchmark profiles for the Strand linked list.
//!
//! - [`filled_list`]: a list of `1..=n` built with `insert_end`
//! - [`probe_indices`]: deterministic pseudo-random insert positions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strand::{List, ListError, SharedAllocator};
use strand_core::Value;

/// Build a list holding `1..=n` through `allocator`.
pub fn filled_list(n: usize, allocator: SharedAllocator) -> Result<List, ListError> {
    let mut list = List::new_in(allocator)?;
    for v in 1..=n as Value {
        list.insert_end(v)?;
    }
    Ok(list)
}

/// `count` insert positions, each valid for a list that starts with
/// `initial_len` elements and grows by one per insert.
///
/// Uses a fixed 64-bit LCG so every run probes the same positions.
pub fn probe_indices(initial_len: usize, count: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..count)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as usize) % (initial_len + i + 1)
        })
        .collect()
}
