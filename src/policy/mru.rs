//! MRU (most recently used) replacement.

use crate::policy::ReplacementPolicy;
use crate::set::{EntryRef, SetView};

/// Evicts the most recently touched entry.
///
/// The opposite of [`Lru`](crate::policy::Lru), useful for cyclic access
/// patterns where the entry touched a moment ago is the one least likely to
/// be needed again soon. Selection is O(1) — the victim is always the back of
/// the recency order.
///
/// # Example
///
/// ```
/// use waycache::cache::SetAssociativeCache;
/// use waycache::policy::Mru;
///
/// let cache: SetAssociativeCache<u32, &str> =
///     SetAssociativeCache::try_with_policy(2, 1, Mru).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
///
/// // Key 2 is the most recently touched, so it goes first.
/// cache.put(3, "three");
/// assert!(!cache.contains(&2));
/// assert!(cache.contains(&1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Mru;

impl<K, V> ReplacementPolicy<K, V> for Mru {
    #[inline]
    fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
        set.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::RecencyList;
    use crate::entry::Entry;

    #[test]
    fn selects_the_back_of_the_order() {
        let mut order = RecencyList::new();
        order.push_back(Entry::new(1u64, "a"));
        order.push_back(Entry::new(2u64, "b"));
        order.push_back(Entry::new(3u64, "c"));

        let view = SetView { order: &order };
        let victim = Mru.select(view).map(|entry| *entry.key());
        assert_eq!(victim, Some(3));
    }

    #[test]
    fn empty_view_selects_nothing() {
        let order: RecencyList<Entry<u64, u64>> = RecencyList::new();
        let view = SetView { order: &order };
        assert!(Mru.select(view).is_none());
    }
}
