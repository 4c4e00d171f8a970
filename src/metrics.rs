//! Operation counters, compiled in with the `metrics` feature.
//!
//! Counters are relaxed atomics: cheap enough to sit on the hot path, precise
//! enough for hit-rate and churn dashboards. Snapshots are not linearizable
//! with respect to in-flight operations.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::set::PutOutcome;

/// Live counters owned by a cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    gets: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    puts: AtomicU64,
    updates: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

impl CacheMetrics {
    pub(crate) fn record_get(&self, hit: bool) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_put(&self, outcome: PutOutcome) {
        self.puts.fetch_add(1, Ordering::Relaxed);
        match outcome {
            PutOutcome::Updated => {
                self.updates.fetch_add(1, Ordering::Relaxed);
            }
            PutOutcome::Inserted { evicted } => {
                self.inserts.fetch_add(1, Ordering::Relaxed);
                if evicted {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of a cache's operation counters.
///
/// Returned by
/// [`SetAssociativeCache::metrics_snapshot`](crate::cache::SetAssociativeCache::metrics_snapshot).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total get calls.
    pub gets: u64,
    /// Gets that found the key.
    pub hits: u64,
    /// Gets that missed, including gets routed to never-populated sets.
    pub misses: u64,
    /// Total put calls.
    pub puts: u64,
    /// Puts that replaced an existing key's value.
    pub updates: u64,
    /// Puts that inserted a new key.
    pub inserts: u64,
    /// Inserts that had to evict a victim first.
    pub evictions: u64,
}
