//! Slab configuration parameters.

/// Configuration for a [`NodeSlab`](crate::NodeSlab).
///
/// Controls up-front slot reservation and the hard node limit.
/// All values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of slots reserved when the slab is created.
    ///
    /// Default: 0. Reservation only avoids `Vec` regrowth; it does not
    /// consult the allocator.
    pub initial_capacity: usize,

    /// Maximum number of live nodes.
    ///
    /// Default: `u32::MAX`, the largest slot index a [`NodeHandle`]
    /// can address.
    ///
    /// [`NodeHandle`]: crate::NodeHandle
    pub max_nodes: u32,
}

impl ArenaConfig {
    /// Default slot reservation.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

    /// Default node limit.
    pub const DEFAULT_MAX_NODES: u32 = u32::MAX;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_nodes: Self::DEFAULT_MAX_NODES,
        }
    }

    /// Create a config with the given node limit.
    pub fn with_max_nodes(max_nodes: u32) -> Self {
        Self {
            max_nodes,
            ..Self::new()
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
