//! Growth policy knobs for [`HashTable`](crate::HashTable).

use crate::error::ConfigError;

/// Number of buckets a table starts with.
pub const INITIAL_CAPACITY: usize = 16;

/// Growth triggers when `len / capacity` exceeds this before an insert.
pub const LOAD_FACTOR: f64 = 0.5;

/// Multiplier applied to the bucket count on growth.
pub const GROW_FACTOR: usize = 2;

/// Sizing and growth parameters for a table.
///
/// Built with the `with_*` setters and checked by [`validate`](Self::validate)
/// when handed to [`HashTable::with_config`](crate::HashTable::with_config).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
    pub grow_factor: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            load_factor: LOAD_FACTOR,
            grow_factor: GROW_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_grow_factor(mut self, grow_factor: usize) -> Self {
        self.grow_factor = grow_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        if self.grow_factor < 2 {
            return Err(ConfigError::InvalidGrowFactor(self.grow_factor));
        }
        Ok(())
    }

    /// True when a table holding `len` entries in `capacity` buckets must
    /// grow before accepting another insert.
    #[inline]
    pub(crate) fn needs_growth(&self, len: usize, capacity: usize) -> bool {
        len as f64 / capacity as f64 > self.load_factor
    }

    #[inline]
    pub(crate) fn grown_capacity(&self, capacity: usize) -> usize {
        capacity.saturating_mul(self.grow_factor)
    }
}
