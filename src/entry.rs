//! Cache entry record.
//!
//! An [`Entry`] is the unit of storage in a cache set: an immutable key, a
//! mutable value, and the access metadata (creation time, last access time,
//! access frequency) that replacement policies select victims by.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as milliseconds since the Unix epoch.
///
/// Clocks before the epoch collapse to 0 rather than failing; entry
/// timestamps are advisory metadata, not ordering guarantees.
pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// A key-value pair stored in a cache set, together with the access metadata
/// used by replacement policies.
///
/// Entries are created and owned by the set that holds them; callers and
/// policies only ever observe them by reference, through
/// [`SetAssociativeCache::peek_with`](crate::cache::SetAssociativeCache::peek_with)
/// or a [`SetView`](crate::set::SetView).
///
/// # Example
///
/// ```
/// use waycache::cache::SetAssociativeCache;
///
/// let cache: SetAssociativeCache<u64, &str> = SetAssociativeCache::new(4, 16);
/// cache.put(7, "seven");
///
/// let frequency = cache.peek_with(&7, |entry| entry.frequency());
/// assert_eq!(frequency, Some(1));
/// ```
#[derive(Debug)]
pub struct Entry<K, V> {
    key: K,
    value: V,
    create_time: u64,
    access_time: u64,
    frequency: u64,
}

impl<K, V> Entry<K, V> {
    /// Creates a fresh entry: `create_time == access_time == now`,
    /// `frequency == 1` (the creating put counts as the first access).
    pub(crate) fn new(key: K, value: V) -> Self {
        let now = unix_millis();
        Self {
            key,
            value,
            create_time: now,
            access_time: now,
            frequency: 1,
        }
    }

    /// Returns the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the cached value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Creation time in epoch milliseconds.
    ///
    /// Set once at first insertion and never changed, even when the value is
    /// overwritten by a later put.
    #[inline]
    pub fn create_time(&self) -> u64 {
        self.create_time
    }

    /// Last access time in epoch milliseconds.
    ///
    /// Updated by every get and every put that touches this entry.
    #[inline]
    pub fn access_time(&self) -> u64 {
        self.access_time
    }

    /// Number of accesses since creation.
    ///
    /// Starts at 1 (the creating put counts) and increments by exactly 1 on
    /// every subsequent get or put targeting this entry.
    #[inline]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Swaps in a new value, returning the old one. Does not touch.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Records one access: bumps `access_time` and `frequency`.
    pub(crate) fn record_access(&mut self) {
        self.access_time = unix_millis();
        self.frequency += 1;
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}
