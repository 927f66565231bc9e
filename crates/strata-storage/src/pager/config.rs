//! Pager configuration.

use strata_common::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_POOL_BUFFERS};

/// Configuration for a [`Pager`](super::Pager).
#[derive(Debug, Clone)]
pub struct PagerConfig {
    /// Maximum number of pages kept resident.
    pub cache_capacity: usize,
    /// Number of I/O buffers pre-allocated in the memory pool.
    pub pool_buffers: usize,
}

impl PagerConfig {
    /// Creates a configuration with the given cache capacity.
    #[must_use]
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache_capacity,
            pool_buffers: DEFAULT_POOL_BUFFERS,
        }
    }

    /// Sets the number of pre-allocated pool buffers.
    #[must_use]
    pub fn with_pool_buffers(mut self, pool_buffers: usize) -> Self {
        self.pool_buffers = pool_buffers;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be > 0");
        }
        Ok(())
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PagerConfig::default();
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.pool_buffers, DEFAULT_POOL_BUFFERS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PagerConfig::new(16).with_pool_buffers(4);
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.pool_buffers, 4);
    }

    #[test]
    fn test_validation() {
        assert!(PagerConfig::new(0).validate().is_err());
        assert!(PagerConfig::new(1).validate().is_ok());
    }
}
