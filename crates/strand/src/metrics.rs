//! Allocation and structure counters for a list.
//!
//! [`ListMetrics`] is a point-in-time copy returned by
//! [`List::metrics`](crate::List::metrics).

/// Counters describing one list.
///
/// Allocation counters are cumulative over the list's lifetime and cover
/// node records only; the list's own record and cursor records are not
/// included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListMetrics {
    /// Current number of elements.
    pub len: usize,
    /// Current structural generation.
    pub generation: u64,
    /// Slots held by the node slab (live + free + retired).
    pub node_slots: usize,
    /// Released slots waiting for reuse.
    pub free_slots: usize,
    /// Node allocations granted.
    pub node_allocations: u64,
    /// Node allocations released.
    pub node_releases: u64,
    /// Node allocations refused by the allocator.
    pub failed_allocations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = ListMetrics::default();
        assert_eq!(m.len, 0);
        assert_eq!(m.generation, 0);
        assert_eq!(m.node_slots, 0);
        assert_eq!(m.free_slots, 0);
        assert_eq!(m.node_allocations, 0);
        assert_eq!(m.node_releases, 0);
        assert_eq!(m.failed_allocations, 0);
    }
}
