//! A single cache set: a bounded, recency-ordered collection of entries
//! guarded by one exclusive lock.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        CacheSet<K, V>                                │
//! │                                                                      │
//! │  Mutex<SetInner>                                                     │
//! │  ┌────────────────────────────────────────────────────────────────┐  │
//! │  │  index: FxHashMap<K, NodeId>     order: RecencyList<Entry>     │  │
//! │  │                                                                │  │
//! │  │  ┌──────┬────────┐   least recent              most recent    │  │
//! │  │  │ key  │ NodeId │      (evict under LRU)   (evict under MRU) │  │
//! │  │  ├──────┼────────┤        │                        │          │  │
//! │  │  │  k1  │  id_0  │        ▼                        ▼          │  │
//! │  │  │  k2  │  id_1  │      [id_0] ◄──► [id_1] ◄──► [id_2]        │  │
//! │  │  │  k3  │  id_2  │                                            │  │
//! │  │  └──────┴────────┘                                            │  │
//! │  └────────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//!
//! Touch (get, or put on an existing key)
//! ──────────────────────────────────────
//!   1. Resolve key → NodeId through the index
//!   2. Bump access_time and frequency
//!   3. Move the node to the most recently touched end
//!
//! Insert into a full set
//! ──────────────────────
//!   1. Hand the active ReplacementPolicy a read-only SetView
//!   2. Remove the selected victim from the order and the index
//!   3. Insert the new entry at the most recently touched end
//! ```
//!
//! Every operation acquires the set's mutex, so operations on one set are
//! fully serialized while remaining independent of every other set. The
//! policy callback runs while the invoking thread holds the lock, which is
//! what lets it observe a stable snapshot through [`SetView`].
//!
//! [`SetView`] and [`EntryRef`] are the read-only capability handed to
//! policies. They borrow the locked state, so neither can outlive the
//! operation that produced them — iteration outside the lock window is
//! unrepresentable rather than undefined.

use std::hash::Hash;
use std::ops::Deref;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::{NodeId, RecencyList};
use crate::entry::Entry;
use crate::policy::ReplacementPolicy;

/// What a put did, for operation accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PutOutcome {
    /// The key existed; its value was replaced and the entry touched.
    Updated,
    /// A new entry was inserted, evicting a victim first if the set was full.
    Inserted { evicted: bool },
}

/// One independently locked partition of a [`SetAssociativeCache`].
///
/// Holds at most `capacity` entries in least-to-most recently touched order.
///
/// [`SetAssociativeCache`]: crate::cache::SetAssociativeCache
pub(crate) struct CacheSet<K, V> {
    inner: Mutex<SetInner<K, V>>,
}

struct SetInner<K, V> {
    index: FxHashMap<K, NodeId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> CacheSet<K, V>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(SetInner {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                order: RecencyList::with_capacity(capacity),
                capacity,
            }),
        }
    }

    /// Looks up `key`, touching the entry on a hit.
    pub(crate) fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut inner = self.inner.lock();
        inner.get(key)
    }

    /// Inserts or updates `key`, evicting through `policy` if the set is full
    /// and the key is new.
    pub(crate) fn put(&self, key: K, value: V, policy: &dyn ReplacementPolicy<K, V>) -> PutOutcome {
        let mut inner = self.inner.lock();
        inner.put(key, value, policy)
    }

    /// Membership test; never touches.
    pub(crate) fn contains(&self, key: &K) -> bool {
        let inner = self.inner.lock();
        inner.index.contains_key(key)
    }

    /// Removes `key` and returns its value.
    pub(crate) fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        inner.remove(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.with_view(|view| view.len())
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.order.clear();
    }

    /// Runs `f` on the entry for `key` without touching it.
    pub(crate) fn peek_with<R>(&self, key: &K, f: impl FnOnce(&Entry<K, V>) -> R) -> Option<R> {
        let inner = self.inner.lock();
        let id = *inner.index.get(key)?;
        inner.order.get(id).map(f)
    }

    /// Runs `f` on a read-only view of this set while holding its lock.
    pub(crate) fn with_view<R>(&self, f: impl FnOnce(SetView<'_, K, V>) -> R) -> R {
        let inner = self.inner.lock();
        f(SetView {
            order: &inner.order,
        })
    }
}

impl<K, V> SetInner<K, V>
where
    K: Clone + Eq + Hash,
{
    fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let id = *self.index.get(key)?;
        self.touch(id);
        self.order.get(id).map(|entry| entry.value().clone())
    }

    fn put(&mut self, key: K, value: V, policy: &dyn ReplacementPolicy<K, V>) -> PutOutcome {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.replace_value(value);
            }
            self.touch(id);
            return PutOutcome::Updated;
        }

        let evicted = if self.index.len() == self.capacity {
            self.evict_one(policy);
            true
        } else {
            false
        };

        let id = self.order.push_back(Entry::new(key.clone(), value));
        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        if let Err(err) = self.order.check_invariants() {
            panic!("recency order corrupted: {err}");
        }

        PutOutcome::Inserted { evicted }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(Entry::into_value)
    }

    /// Records one access and repositions the entry at the most recently
    /// touched end.
    fn touch(&mut self, id: NodeId) {
        if let Some(entry) = self.order.get_mut(id) {
            entry.record_access();
        }
        self.order.move_to_back(id);
    }

    /// Asks the active policy for a victim and removes it.
    ///
    /// The view's lifetime ties any returned [`EntryRef`] to this set, so a
    /// policy cannot hand back an entry belonging to another set; selecting
    /// no entry at all is a contract violation and aborts the insert.
    fn evict_one(&mut self, policy: &dyn ReplacementPolicy<K, V>) {
        let victim = policy
            .select(SetView {
                order: &self.order,
            })
            .map(|entry| entry.id);

        let Some(id) = victim else {
            panic!("replacement policy selected no entry from a non-empty set");
        };

        match self.order.remove(id) {
            Some(entry) => {
                self.index.remove(entry.key());
            }
            None => panic!("replacement policy selected an entry this set does not own"),
        }
    }
}

// ---------------------------------------------------------------------------
// Read-only view
// ---------------------------------------------------------------------------

/// Read-only view of one cache set, ordered from least to most recently
/// touched.
///
/// This is the only capability a [`ReplacementPolicy`] receives: it can
/// observe the set's entries and their order but cannot mutate anything.
/// The view borrows the set while its lock is held by the invoking
/// operation, so a policy always sees a stable snapshot.
///
/// # Example
///
/// A policy that evicts the entry with the lowest access frequency:
///
/// ```
/// use waycache::policy::ReplacementPolicy;
/// use waycache::set::{EntryRef, SetView};
///
/// struct FewestHits;
///
/// impl<K, V> ReplacementPolicy<K, V> for FewestHits {
///     fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
///         set.iter().min_by_key(|entry| entry.frequency())
///     }
/// }
/// ```
pub struct SetView<'a, K, V> {
    pub(crate) order: &'a RecencyList<Entry<K, V>>,
}

impl<K, V> Clone for SetView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for SetView<'_, K, V> {}

impl<'a, K, V> SetView<'a, K, V> {
    /// Number of entries currently in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The least recently touched entry, or `None` if the set is empty.
    pub fn first(&self) -> Option<EntryRef<'a, K, V>> {
        self.order.front_id().and_then(|id| self.entry(id))
    }

    /// The most recently touched entry, or `None` if the set is empty.
    pub fn last(&self) -> Option<EntryRef<'a, K, V>> {
        self.order.back_id().and_then(|id| self.entry(id))
    }

    /// Iterates from least to most recently touched.
    ///
    /// Each call produces a fresh iterator; the sequence is lazy, finite,
    /// and not restartable.
    pub fn iter(&self) -> SetIter<'a, K, V> {
        SetIter {
            inner: self.order.iter(),
        }
    }

    /// Iterates from most to least recently touched.
    pub fn iter_descending(&self) -> SetIterDescending<'a, K, V> {
        SetIterDescending {
            inner: self.order.iter_descending(),
        }
    }

    fn entry(&self, id: NodeId) -> Option<EntryRef<'a, K, V>> {
        self.order.get(id).map(|entry| EntryRef { id, entry })
    }
}

/// Reference to one entry inside a [`SetView`].
///
/// Dereferences to [`Entry`] for the metadata accessors and carries the
/// entry's identity so the owning set can locate a policy's selection.
pub struct EntryRef<'a, K, V> {
    pub(crate) id: NodeId,
    entry: &'a Entry<K, V>,
}

impl<K, V> Clone for EntryRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for EntryRef<'_, K, V> {}

impl<'a, K, V> Deref for EntryRef<'a, K, V> {
    type Target = Entry<K, V>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.entry
    }
}

/// Iterator over a [`SetView`] from least to most recently touched.
pub struct SetIter<'a, K, V> {
    inner: crate::ds::recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for SetIter<'a, K, V> {
    type Item = EntryRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, entry)| EntryRef { id, entry })
    }
}

/// Iterator over a [`SetView`] from most to least recently touched.
pub struct SetIterDescending<'a, K, V> {
    inner: crate::ds::recency_list::IterDescending<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for SetIterDescending<'a, K, V> {
    type Item = EntryRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, entry)| EntryRef { id, entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Lru, Mru};

    fn keys_in_order(set: &CacheSet<u64, u64>) -> Vec<u64> {
        set.with_view(|view| view.iter().map(|entry| *entry.key()).collect())
    }

    // ==============================================
    // Basic Operations
    // ==============================================

    #[test]
    fn put_and_get() {
        let set = CacheSet::new(4);
        assert_eq!(
            set.put(1u64, 10u64, &Lru),
            PutOutcome::Inserted { evicted: false }
        );
        assert_eq!(set.get(&1), Some(10));
        assert_eq!(set.get(&2), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn update_replaces_value_without_growing() {
        let set = CacheSet::new(4);
        set.put(1u64, 10u64, &Lru);
        assert_eq!(set.put(1, 11, &Lru), PutOutcome::Updated);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&1), Some(11));
    }

    #[test]
    fn contains_does_not_touch() {
        let set = CacheSet::new(2);
        set.put(1u64, 1u64, &Lru);
        set.put(2, 2, &Lru);

        // contains(1) must not promote key 1; it stays LRU and is evicted.
        assert!(set.contains(&1));
        set.put(3, 3, &Lru);
        assert!(!set.contains(&1));
        assert!(set.contains(&2));
    }

    #[test]
    fn remove_returns_value_and_shrinks() {
        let set = CacheSet::new(4);
        set.put(1u64, 10u64, &Lru);
        set.put(2, 20, &Lru);

        assert_eq!(set.remove(&1), Some(10));
        assert_eq!(set.remove(&1), None);
        assert_eq!(set.len(), 1);
        assert_eq!(keys_in_order(&set), vec![2]);
    }

    #[test]
    fn clear_empties_the_set() {
        let set = CacheSet::new(4);
        set.put(1u64, 1u64, &Lru);
        set.put(2, 2, &Lru);
        set.clear();
        assert_eq!(set.len(), 0);
        assert_eq!(set.get(&1), None);

        // The set keeps its capacity and accepts entries again.
        set.put(3, 3, &Lru);
        assert_eq!(set.len(), 1);
    }

    // ==============================================
    // Recency Order & Touch Semantics
    // ==============================================

    #[test]
    fn get_moves_entry_to_most_recent_end() {
        let set = CacheSet::new(4);
        for key in 1u64..=3 {
            set.put(key, key, &Lru);
        }
        assert_eq!(keys_in_order(&set), vec![1, 2, 3]);

        set.get(&1);
        assert_eq!(keys_in_order(&set), vec![2, 3, 1]);
    }

    #[test]
    fn update_moves_entry_to_most_recent_end() {
        let set = CacheSet::new(4);
        for key in 1u64..=3 {
            set.put(key, key, &Lru);
        }
        set.put(1, 100, &Lru);
        assert_eq!(keys_in_order(&set), vec![2, 3, 1]);
    }

    #[test]
    fn frequency_counts_every_touch() {
        let set = CacheSet::new(4);
        set.put(1u64, 0u64, &Lru);
        assert_eq!(set.peek_with(&1, |entry| entry.frequency()), Some(1));

        set.get(&1);
        set.get(&1);
        set.put(1, 1, &Lru);
        assert_eq!(set.peek_with(&1, |entry| entry.frequency()), Some(4));
    }

    #[test]
    fn create_time_survives_updates() {
        let set = CacheSet::new(4);
        set.put(1u64, 0u64, &Lru);
        let created = set.peek_with(&1, |entry| entry.create_time());

        set.put(1, 1, &Lru);
        set.get(&1);
        assert_eq!(set.peek_with(&1, |entry| entry.create_time()), created);
    }

    #[test]
    fn peek_with_does_not_touch() {
        let set = CacheSet::new(4);
        set.put(1u64, 0u64, &Lru);
        set.put(2, 0, &Lru);

        set.peek_with(&1, |_| ());
        assert_eq!(keys_in_order(&set), vec![1, 2]);
        assert_eq!(set.peek_with(&1, |entry| entry.frequency()), Some(1));
    }

    // ==============================================
    // Eviction
    // ==============================================

    #[test]
    fn lru_evicts_least_recently_touched() {
        let set = CacheSet::new(3);
        for key in 1u64..=3 {
            set.put(key, key, &Lru);
        }
        set.get(&1);

        set.put(4, 4, &Lru);
        assert!(!set.contains(&2), "LRU entry should be evicted");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn mru_evicts_most_recently_touched() {
        let set = CacheSet::new(3);
        for key in 1u64..=3 {
            set.put(key, key, &Mru);
        }
        set.get(&1);

        set.put(4, 4, &Mru);
        assert!(!set.contains(&1), "MRU entry should be evicted");
        assert!(set.contains(&2));
        assert!(set.contains(&3));
    }

    #[test]
    fn update_never_evicts_at_capacity() {
        let set = CacheSet::new(2);
        set.put(1u64, 1u64, &Lru);
        set.put(2, 2, &Lru);

        assert_eq!(set.put(1, 100, &Lru), PutOutcome::Updated);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&2));
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let set = CacheSet::new(4);
        for key in 0u64..64 {
            set.put(key, key, &Lru);
            assert!(set.len() <= 4);
        }
        assert_eq!(set.len(), 4);
    }

    #[test]
    #[should_panic(expected = "selected no entry")]
    fn policy_selecting_nothing_is_fatal() {
        struct SelectNone;
        impl<K, V> ReplacementPolicy<K, V> for SelectNone {
            fn select<'a>(&self, _set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
                None
            }
        }

        let set = CacheSet::new(1);
        set.put(1u64, 1u64, &SelectNone);
        set.put(2, 2, &SelectNone);
    }

    // ==============================================
    // Views & Iteration
    // ==============================================

    #[test]
    fn view_exposes_first_last_and_both_orders() {
        let set = CacheSet::new(4);
        for key in 1u64..=4 {
            set.put(key, key * 10, &Lru);
        }

        set.with_view(|view| {
            assert_eq!(view.len(), 4);
            assert!(!view.is_empty());
            assert_eq!(view.first().map(|entry| *entry.key()), Some(1));
            assert_eq!(view.last().map(|entry| *entry.key()), Some(4));

            let forward: Vec<_> = view.iter().map(|entry| *entry.key()).collect();
            let backward: Vec<_> = view.iter_descending().map(|entry| *entry.key()).collect();
            assert_eq!(forward, vec![1, 2, 3, 4]);
            assert_eq!(backward, vec![4, 3, 2, 1]);
        });
    }

    #[test]
    fn view_of_empty_set() {
        let set: CacheSet<u64, u64> = CacheSet::new(4);
        set.with_view(|view| {
            assert!(view.is_empty());
            assert!(view.first().is_none());
            assert!(view.last().is_none());
            assert_eq!(view.iter().count(), 0);
        });
    }

    #[test]
    fn custom_policy_sees_pre_eviction_order() {
        // Evicts the entry with the largest key; the selection must match
        // what the rule picks from the order as it stood before the insert.
        struct LargestKey;
        impl<V> ReplacementPolicy<u64, V> for LargestKey {
            fn select<'a>(&self, set: SetView<'a, u64, V>) -> Option<EntryRef<'a, u64, V>> {
                set.iter().max_by_key(|entry| *entry.key())
            }
        }

        let set = CacheSet::new(3);
        set.put(5u64, 0u64, &LargestKey);
        set.put(9, 0, &LargestKey);
        set.put(2, 0, &LargestKey);

        set.put(7, 0, &LargestKey);
        assert!(!set.contains(&9));
        assert_eq!(set.len(), 3);

        // The rule judges the order as it stands before 8 lands, so 7 goes.
        set.put(8, 0, &LargestKey);
        assert!(!set.contains(&7));
        assert!(set.contains(&5));
        assert!(set.contains(&2));
        assert!(set.contains(&8));
    }
}
