//! waycache: an N-way set-associative, in-process concurrent cache with
//! pluggable replacement policies.
//!
//! Keys are routed to a fixed number of independently locked sets by hash;
//! each set keeps up to `set_capacity` entries ordered by access recency and
//! evicts through a [`ReplacementPolicy`](policy::ReplacementPolicy) when a
//! new key arrives at capacity. LRU (the default), MRU, and LFU ship built
//! in; custom policies are ordinary values implementing the same trait.
//!
//! ```
//! use waycache::cache::SetAssociativeCache;
//! use waycache::policy::Mru;
//!
//! let cache: SetAssociativeCache<u64, String> = SetAssociativeCache::new(4, 16);
//!
//! cache.put(1, "one".to_string());
//! assert_eq!(cache.get(&1), Some("one".to_string()));
//!
//! // The replacement policy can be swapped on the live cache.
//! cache.set_policy(Mru);
//! ```
//!
//! Sets are created lazily on first put and synchronization is per set, so
//! operations in one set never block operations in any other.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod entry;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod set;
