//! LFU (least frequently used) replacement.

use crate::policy::ReplacementPolicy;
use crate::set::{EntryRef, SetView};

/// Evicts the entry with the lowest access frequency.
///
/// Scans the whole set, so eviction costs O(set size) — gets and puts that do
/// not evict stay O(1). Ties break toward the least recently touched entry,
/// since the forward scan visits entries in recency order.
///
/// # Example
///
/// ```
/// use waycache::cache::SetAssociativeCache;
/// use waycache::policy::Lfu;
///
/// let cache: SetAssociativeCache<u32, &str> =
///     SetAssociativeCache::try_with_policy(3, 1, Lfu).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.put(3, "three");
///
/// // Keys 1 and 3 get extra hits; key 2 stays at frequency 1.
/// cache.get(&1);
/// cache.get(&3);
///
/// cache.put(4, "four");
/// assert!(!cache.contains(&2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfu;

impl<K, V> ReplacementPolicy<K, V> for Lfu {
    fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
        set.iter().min_by_key(|entry| entry.frequency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::RecencyList;
    use crate::entry::Entry;

    #[test]
    fn selects_lowest_frequency() {
        let mut order = RecencyList::new();
        order.push_back(Entry::new(1u64, ()));
        let hot = order.push_back(Entry::new(2u64, ()));
        order.push_back(Entry::new(3u64, ()));

        // Key 2 accumulates accesses; 1 and 3 stay at frequency 1.
        for _ in 0..3 {
            if let Some(entry) = order.get_mut(hot) {
                entry.record_access();
            }
        }
        if let Some(entry) = order.get_mut(hot) {
            assert_eq!(entry.frequency(), 4);
        }

        let view = SetView { order: &order };
        let victim = Lfu.select(view).map(|entry| *entry.key());
        assert_eq!(victim, Some(1), "tie breaks toward the least recent");
    }

    #[test]
    fn empty_view_selects_nothing() {
        let order: RecencyList<Entry<u64, u64>> = RecencyList::new();
        let view = SetView { order: &order };
        assert!(Lfu.select(view).is_none());
    }
}
