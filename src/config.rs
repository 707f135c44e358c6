//! Table sizing parameters.

use crate::error::ConfigError;

/// Bucket count a fresh (or cleared) map starts with.
pub const DEFAULT_BUCKET_COUNT: usize = 8;

/// Highest `len / bucket_count` ratio tolerated after an insert.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Smallest accepted max load factor. Keeps the number of doublings a single
/// insert can trigger small.
pub const MIN_MAX_LOAD_FACTOR: f64 = 1.0 / 64.0;

/// Sizing policy of a `ChainedHashMap`.
///
/// Both fields are validated on construction, so a `MapConfig` held by a map
/// always has a non-zero bucket count and a finite, positive load factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    initial_buckets: usize,
    max_load_factor: f64,
}

impl MapConfig {
    pub fn new(initial_buckets: usize, max_load_factor: f64) -> Result<Self, ConfigError> {
        if initial_buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !max_load_factor.is_finite() || max_load_factor < MIN_MAX_LOAD_FACTOR {
            return Err(ConfigError::InvalidLoadFactor(max_load_factor));
        }
        Ok(Self {
            initial_buckets,
            max_load_factor,
        })
    }

    pub fn with_initial_buckets(self, initial_buckets: usize) -> Result<Self, ConfigError> {
        Self::new(initial_buckets, self.max_load_factor)
    }

    pub fn with_max_load_factor(self, max_load_factor: f64) -> Result<Self, ConfigError> {
        Self::new(self.initial_buckets, max_load_factor)
    }

    pub fn initial_buckets(&self) -> usize {
        self.initial_buckets
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKET_COUNT,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}
