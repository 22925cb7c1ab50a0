//! List configuration and validation.
//!
//! [`ListConfig`] is passed to [`List::with_config`](crate::List::with_config)
//! and checked once at construction. It is immutable afterwards.

use std::error::Error;
use std::fmt;

use strand_arena::ArenaConfig;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ListConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_len` is zero.
    ZeroMaxLen,
    /// `max_len` does not fit the slab's u32 handle space.
    MaxLenOverflow {
        /// The configured value.
        value: usize,
    },
    /// `initial_capacity` is larger than `max_len`.
    CapacityAboveMax {
        /// The configured reservation.
        initial_capacity: usize,
        /// The configured limit.
        max_len: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxLen => write!(f, "max_len must be at least 1"),
            Self::MaxLenOverflow { value } => {
                write!(f, "max_len {value} exceeds u32::MAX")
            }
            Self::CapacityAboveMax {
                initial_capacity,
                max_len,
            } => {
                write!(
                    f,
                    "initial_capacity {initial_capacity} is larger than max_len {max_len}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

// ── ListConfig ─────────────────────────────────────────────────────

/// Construction parameters for a [`List`](crate::List).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Node slots reserved up front. Default: 0.
    pub initial_capacity: usize,
    /// Maximum number of elements. Default and upper bound: `u32::MAX`.
    pub max_len: usize,
}

impl ListConfig {
    /// Default slot reservation.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

    /// Default element limit.
    pub const DEFAULT_MAX_LEN: usize = u32::MAX as usize;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_len: Self::DEFAULT_MAX_LEN,
        }
    }

    /// Check all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_len == 0 {
            return Err(ConfigError::ZeroMaxLen);
        }
        if self.max_len > u32::MAX as usize {
            return Err(ConfigError::MaxLenOverflow {
                value: self.max_len,
            });
        }
        if self.initial_capacity > self.max_len {
            return Err(ConfigError::CapacityAboveMax {
                initial_capacity: self.initial_capacity,
                max_len: self.max_len,
            });
        }
        Ok(())
    }

    /// The slab configuration this list config translates to.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeds; an
    /// oversized `max_len` saturates at `u32::MAX`.
    pub fn arena_config(&self) -> ArenaConfig {
        ArenaConfig {
            initial_capacity: self.initial_capacity,
            max_nodes: u32::try_from(self.max_len).unwrap_or(u32::MAX),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ListConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_max_len_rejected() {
        let config = ListConfig {
            max_len: 0,
            ..ListConfig::new()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxLen));
    }

    #[test]
    fn reservation_above_limit_rejected() {
        let config = ListConfig {
            initial_capacity: 10,
            max_len: 4,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityAboveMax {
                initial_capacity: 10,
                max_len: 4
            })
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_max_len_rejected() {
        let config = ListConfig {
            max_len: u32::MAX as usize + 1,
            ..ListConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxLenOverflow { .. })
        ));
    }

    #[test]
    fn arena_config_carries_limits() {
        let config = ListConfig {
            initial_capacity: 8,
            max_len: 16,
        };
        let arena = config.arena_config();
        assert_eq!(arena.initial_capacity, 8);
        assert_eq!(arena.max_nodes, 16);
    }
}
