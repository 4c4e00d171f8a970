//! LRU (least recently used) replacement.

use crate::policy::ReplacementPolicy;
use crate::set::{EntryRef, SetView};

/// Evicts the least recently touched entry.
///
/// The classic default: entries that have not been read or written for the
/// longest time go first. Selection is O(1) — the victim is always the front
/// of the recency order.
///
/// # Example
///
/// ```
/// use waycache::cache::SetAssociativeCache;
///
/// // One set of two entries keeps the eviction order visible.
/// let cache: SetAssociativeCache<u32, &str> = SetAssociativeCache::new(2, 1);
/// cache.put(1, "one");
/// cache.put(2, "two");
///
/// // Touch key 1 so key 2 becomes least recently used.
/// cache.get(&1);
///
/// cache.put(3, "three");
/// assert!(!cache.contains(&2));
/// assert!(cache.contains(&1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Lru;

impl<K, V> ReplacementPolicy<K, V> for Lru {
    #[inline]
    fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
        set.first()
    }
}
