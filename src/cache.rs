//! N-way set-associative cache.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    SetAssociativeCache<K, V, S>                     │
//! │                                                                     │
//! │   key ──► hash(key) % set_count ──► slot index                      │
//! │                                                                     │
//! │   sets: Box<[OnceBox<CacheSet>]>                                    │
//! │   ┌─────────┬─────────┬─────────┬─────────┐                         │
//! │   │ Set 0   │ (empty) │ Set 2   │ (empty) │   slots populate        │
//! │   │ Mutex   │         │ Mutex   │         │   lazily, once, on      │
//! │   │ ≤ cap   │         │ ≤ cap   │         │   first put             │
//! │   └─────────┴─────────┴─────────┴─────────┘                         │
//! │                                                                     │
//! │   policy: RwLock<Arc<dyn ReplacementPolicy>>   one shared policy,   │
//! │                                                swappable live       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each populated set is guarded by its own lock, so operations on one set
//! never block operations on any other — that independence is where the
//! horizontal scalability comes from. Slot population races are settled by an
//! atomic publish: every racing thread may build a candidate set, exactly one
//! is installed, the losers are dropped, and all threads continue with the
//! installed instance. No thread blocks and no put is lost.
//!
//! Set selection is `hash(key) % set_count` using the cache's [`BuildHasher`]
//! (std's `RandomState` by default). Callers are responsible for a
//! well-distributed hash: a skewed one degrades to imbalanced set occupancy,
//! never to incorrect behavior.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use once_cell::race::OnceBox;
use parking_lot::RwLock;

use crate::entry::Entry;
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, MetricsSnapshot};
use crate::policy::{Lru, ReplacementPolicy};
use crate::set::{CacheSet, PutOutcome};

/// The shared, swappable replacement policy installed in a cache.
pub type SharedPolicy<K, V> = Arc<dyn ReplacementPolicy<K, V> + Send + Sync>;

/// Concurrent N-way set-associative cache.
///
/// Keys are routed to one of `set_count` independently locked sets, each
/// holding at most `set_capacity` entries in recency order. When a full set
/// receives a new key, the active [`ReplacementPolicy`] selects the entry to
/// evict; LRU and MRU ship built in, and callers may plug in their own.
///
/// All operations take `&self`; the cache is `Send + Sync` whenever the key,
/// value, and hasher types are, and is typically shared behind an
/// [`Arc`](std::sync::Arc).
///
/// # Example
///
/// ```
/// use waycache::cache::SetAssociativeCache;
/// use waycache::policy::Mru;
///
/// let cache: SetAssociativeCache<u64, String> = SetAssociativeCache::new(4, 16);
///
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// assert_eq!(cache.get(&2), None);
///
/// // Swap the replacement policy on the live cache; all future evictions
/// // in every set follow it.
/// cache.set_policy(Mru);
/// ```
pub struct SetAssociativeCache<K, V, S = RandomState> {
    sets: Box<[OnceBox<CacheSet<K, V>>]>,
    set_capacity: usize,
    policy: RwLock<SharedPolicy<K, V>>,
    hasher: S,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> SetAssociativeCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with the default LRU policy.
    ///
    /// # Panics
    ///
    /// Panics if `set_capacity` or `num_sets` is zero. Use
    /// [`try_new`](Self::try_new) to handle invalid parameters gracefully.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    ///
    /// let cache: SetAssociativeCache<u64, u64> = SetAssociativeCache::new(4, 16);
    /// assert_eq!(cache.capacity(), 64);
    /// ```
    pub fn new(set_capacity: usize, num_sets: usize) -> Self {
        match Self::try_new(set_capacity, num_sets) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a cache with the default LRU policy, validating parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    ///
    /// assert!(SetAssociativeCache::<u64, u64>::try_new(4, 16).is_ok());
    /// assert!(SetAssociativeCache::<u64, u64>::try_new(0, 16).is_err());
    /// assert!(SetAssociativeCache::<u64, u64>::try_new(4, 0).is_err());
    /// ```
    pub fn try_new(set_capacity: usize, num_sets: usize) -> Result<Self, ConfigError> {
        Self::try_with_policy(set_capacity, num_sets, Lru)
    }

    /// Creates a cache with an explicit replacement policy.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    /// use waycache::policy::Mru;
    ///
    /// let cache = SetAssociativeCache::<u64, u64>::try_with_policy(4, 16, Mru).unwrap();
    /// assert_eq!(cache.set_count(), 16);
    /// ```
    pub fn try_with_policy<P>(
        set_capacity: usize,
        num_sets: usize,
        policy: P,
    ) -> Result<Self, ConfigError>
    where
        P: ReplacementPolicy<K, V> + Send + Sync + 'static,
    {
        Self::with_parts(set_capacity, num_sets, Arc::new(policy), RandomState::new())
    }
}

impl<K, V, S> SetAssociativeCache<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn with_parts(
        set_capacity: usize,
        num_sets: usize,
        policy: SharedPolicy<K, V>,
        hasher: S,
    ) -> Result<Self, ConfigError> {
        if set_capacity == 0 {
            return Err(ConfigError::new("set capacity must be greater than 0"));
        }
        if num_sets == 0 {
            return Err(ConfigError::new("number of sets must be greater than 0"));
        }
        let mut sets = Vec::with_capacity(num_sets);
        sets.resize_with(num_sets, OnceBox::new);
        Ok(Self {
            sets: sets.into_boxed_slice(),
            set_capacity,
            policy: RwLock::new(policy),
            hasher,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Looks up `key`, returning a clone of its value.
    ///
    /// A hit touches the entry: its access time and frequency are bumped and
    /// it moves to the most recently touched end of its set. A miss — whether
    /// the key is absent or its set was never populated — has no side effect
    /// and never creates a set.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    ///
    /// let cache: SetAssociativeCache<u64, &str> = SetAssociativeCache::new(4, 16);
    /// cache.put(1, "one");
    ///
    /// assert_eq!(cache.get(&1), Some("one"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let Some(set) = self.sets[self.set_index(key)].get() else {
            self.record_get(false);
            return None;
        };
        let value = set.get(key);
        self.record_get(value.is_some());
        value
    }

    /// Inserts or updates `key`.
    ///
    /// Routes the key to its set, creating the set on first use (racing
    /// creators settle through an atomic publish — exactly one candidate
    /// wins, losers are discarded, nobody blocks). An update to an existing
    /// key replaces the value and touches the entry; a new key in a full set
    /// first evicts the entry selected by the active policy.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    ///
    /// let cache: SetAssociativeCache<u64, &str> = SetAssociativeCache::new(4, 16);
    /// cache.put(1, "one");
    /// cache.put(1, "uno");
    ///
    /// assert_eq!(cache.get(&1), Some("uno"));
    /// ```
    pub fn put(&self, key: K, value: V) {
        let index = self.set_index(&key);
        let set = self.sets[index].get_or_init(|| Box::new(CacheSet::new(self.set_capacity)));
        let policy = self.policy.read().clone();
        let outcome = set.put(key, value, &policy);
        self.record_put(outcome);
    }

    /// Returns `true` if `key` is cached, without touching it.
    ///
    /// Unlike [`get`](Self::get), this never perturbs the recency order or
    /// the entry's metadata.
    pub fn contains(&self, key: &K) -> bool {
        self.sets[self.set_index(key)]
            .get()
            .map(|set| set.contains(key))
            .unwrap_or(false)
    }

    /// Removes `key`, returning its value. Never creates a set.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    ///
    /// let cache: SetAssociativeCache<u64, &str> = SetAssociativeCache::new(4, 16);
    /// cache.put(1, "one");
    ///
    /// assert_eq!(cache.remove(&1), Some("one"));
    /// assert_eq!(cache.remove(&1), None);
    /// ```
    pub fn remove(&self, key: &K) -> Option<V> {
        self.sets[self.set_index(key)]
            .get()
            .and_then(|set| set.remove(key))
    }

    /// Runs `f` on the entry for `key` without touching it.
    ///
    /// Gives callers the same metadata surface policies see: key, value,
    /// creation time, access time, and frequency.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    ///
    /// let cache: SetAssociativeCache<u64, &str> = SetAssociativeCache::new(4, 16);
    /// cache.put(1, "one");
    /// cache.get(&1);
    ///
    /// let frequency = cache.peek_with(&1, |entry| entry.frequency());
    /// assert_eq!(frequency, Some(2));
    /// ```
    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&Entry<K, V>) -> R) -> Option<R> {
        self.sets[self.set_index(key)]
            .get()
            .and_then(|set| set.peek_with(key, f))
    }

    /// Total number of cached entries across all populated sets.
    ///
    /// Sets are counted one at a time, so under concurrent writes the result
    /// is a point-in-time approximation rather than a linearizable snapshot.
    pub fn len(&self) -> usize {
        self.sets
            .iter()
            .filter_map(|slot| slot.get())
            .map(|set| set.len())
            .sum()
    }

    /// Returns `true` if no set holds any entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties every populated set. Populated sets stay populated.
    pub fn clear(&self) {
        for slot in self.sets.iter() {
            if let Some(set) = slot.get() {
                set.clear();
            }
        }
    }

    /// Maximum number of entries per set.
    #[inline]
    pub fn set_capacity(&self) -> usize {
        self.set_capacity
    }

    /// Number of sets.
    #[inline]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Total capacity: `set_capacity * set_count`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.set_capacity * self.sets.len()
    }

    /// Returns the currently installed replacement policy.
    pub fn policy(&self) -> SharedPolicy<K, V> {
        self.policy.read().clone()
    }

    /// Replaces the replacement policy for the whole cache.
    ///
    /// The swap takes effect for operations that start after it completes,
    /// in every set — including sets populated before the swap. Operations
    /// already in flight may still evict under the previous policy; the two
    /// policies are never interleaved within a single eviction, because each
    /// put works from the reference it read at its start.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    /// use waycache::policy::{Lru, Mru};
    ///
    /// let cache: SetAssociativeCache<u64, u64> = SetAssociativeCache::new(4, 16);
    /// cache.set_policy(Mru);
    /// cache.set_policy(Lru);
    /// ```
    pub fn set_policy<P>(&self, policy: P)
    where
        P: ReplacementPolicy<K, V> + Send + Sync + 'static,
    {
        *self.policy.write() = Arc::new(policy);
    }

    fn set_index(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) as usize) % self.sets.len()
    }

    #[cfg(feature = "metrics")]
    fn record_get(&self, hit: bool) {
        self.metrics.record_get(hit);
    }

    #[cfg(not(feature = "metrics"))]
    fn record_get(&self, _hit: bool) {}

    #[cfg(feature = "metrics")]
    fn record_put(&self, outcome: PutOutcome) {
        self.metrics.record_put(outcome);
    }

    #[cfg(not(feature = "metrics"))]
    fn record_put(&self, _outcome: PutOutcome) {}

    /// Point-in-time copy of this cache's operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<K, V, S> fmt::Debug for SetAssociativeCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetAssociativeCache")
            .field("set_capacity", &self.set_capacity)
            .field("set_count", &self.sets.len())
            .finish_non_exhaustive()
    }
}
