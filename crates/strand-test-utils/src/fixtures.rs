//! Value sequences shared across test suites and benchmarks.

use strand_core::Value;

/// `1..=n` as a vector.
pub fn ascending(n: usize) -> Vec<Value> {
    (1..=n as Value).collect()
}

/// `n` values cycling through `0..distinct`, so every value below
/// `distinct` appears roughly `n / distinct` times.
pub fn with_duplicates(n: usize, distinct: Value) -> Vec<Value> {
    let distinct = distinct.max(1);
    (0..n as Value).map(|i| i % distinct).collect()
}
