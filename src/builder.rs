//! Builder for assembling caches.
//!
//! Collects the cache geometry, the set-selection hasher, and the replacement
//! policy before construction, so call sites that need a non-default hasher
//! or policy stay readable.
//!
//! ## Example
//!
//! ```
//! use waycache::builder::CacheBuilder;
//! use waycache::policy::Mru;
//!
//! let cache = CacheBuilder::new(4, 16)
//!     .try_build_with_policy::<u64, String, _>(Mru)
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::cache::SetAssociativeCache;
use crate::error::ConfigError;
use crate::policy::{Lru, ReplacementPolicy};

/// Assembles a [`SetAssociativeCache`] from its parts.
#[derive(Debug, Clone)]
pub struct CacheBuilder<S = RandomState> {
    set_capacity: usize,
    num_sets: usize,
    hasher: S,
}

impl CacheBuilder {
    /// Starts a builder for a cache of `num_sets` sets of `set_capacity`
    /// entries each.
    pub fn new(set_capacity: usize, num_sets: usize) -> Self {
        Self {
            set_capacity,
            num_sets,
            hasher: RandomState::new(),
        }
    }
}

impl<S> CacheBuilder<S> {
    /// Replaces the hasher used to route keys to sets.
    ///
    /// The cache computes `hash(key) % set_count` with this hasher; supply
    /// one with a well-distributed output for balanced sets.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use waycache::builder::CacheBuilder;
    ///
    /// let cache = CacheBuilder::new(4, 16)
    ///     .hasher(RandomState::new())
    ///     .try_build::<u64, u64>()
    ///     .unwrap();
    /// assert_eq!(cache.set_count(), 16);
    /// ```
    pub fn hasher<S2: BuildHasher>(self, hasher: S2) -> CacheBuilder<S2> {
        CacheBuilder {
            set_capacity: self.set_capacity,
            num_sets: self.num_sets,
            hasher,
        }
    }
}

impl<S> CacheBuilder<S>
where
    S: BuildHasher,
{
    /// Builds a cache with the default LRU policy.
    pub fn try_build<K, V>(self) -> Result<SetAssociativeCache<K, V, S>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        self.try_build_with_policy(Lru)
    }

    /// Builds a cache with an explicit replacement policy.
    pub fn try_build_with_policy<K, V, P>(
        self,
        policy: P,
    ) -> Result<SetAssociativeCache<K, V, S>, ConfigError>
    where
        K: Clone + Eq + Hash,
        P: ReplacementPolicy<K, V> + Send + Sync + 'static,
    {
        SetAssociativeCache::with_parts(
            self.set_capacity,
            self.num_sets,
            Arc::new(policy),
            self.hasher,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Mru;

    #[test]
    fn builds_with_defaults() {
        let cache = CacheBuilder::new(4, 16).try_build::<u64, u64>().unwrap();
        assert_eq!(cache.set_capacity(), 4);
        assert_eq!(cache.set_count(), 16);

        cache.put(1, 10);
        assert_eq!(cache.get(&1), Some(10));
    }

    #[test]
    fn builds_with_policy() {
        let cache = CacheBuilder::new(2, 1)
            .try_build_with_policy::<u64, u64, _>(Mru)
            .unwrap();
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        assert!(!cache.contains(&2), "MRU evicts the newest entry");
    }

    #[test]
    fn rejects_invalid_geometry() {
        assert!(CacheBuilder::new(0, 16).try_build::<u64, u64>().is_err());
        assert!(CacheBuilder::new(4, 0).try_build::<u64, u64>().is_err());
    }
}
