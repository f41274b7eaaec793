use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Default number of records kept per loader.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(5000) {
    Some(n) => n,
    None => panic!("cache capacity must be non-zero"),
};

/// Configuration for a [`BatchLoader`](crate::BatchLoader).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum number of records held in the LRU cache.
    pub cache_capacity: NonZeroUsize,
    /// Largest number of keys sent in one fetch. `None` means unbounded:
    /// everything requested in one scheduling turn goes out together.
    pub max_batch_size: Option<NonZeroUsize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_batch_size: None,
        }
    }
}

impl LoaderConfig {
    pub fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_max_batch_size(mut self, size: NonZeroUsize) -> Self {
        self.max_batch_size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = LoaderConfig::default();
        assert_eq!(c.cache_capacity.get(), 5000);
        assert!(c.max_batch_size.is_none());
    }

    #[test]
    fn builder_overrides() {
        let c = LoaderConfig::default()
            .with_cache_capacity(NonZeroUsize::new(10).unwrap())
            .with_max_batch_size(NonZeroUsize::new(3).unwrap());
        assert_eq!(c.cache_capacity.get(), 10);
        assert_eq!(c.max_batch_size.map(NonZeroUsize::get), Some(3));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: LoaderConfig = serde_json::from_str(r#"{ "max_batch_size": 100 }"#).unwrap();
        assert_eq!(c.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(c.max_batch_size.map(NonZeroUsize::get), Some(100));
    }
}
