//! Replacement policies.
//!
//! A [`ReplacementPolicy`] decides which entry a full set gives up when a new
//! key arrives. The policy is a pure selection function: it receives a
//! read-only [`SetView`] of the set (ordered least-to-most recently touched)
//! and names exactly one victim. It never evicts or inserts by itself.
//!
//! Built-in policies:
//!
//! | Policy  | Selects                         | Cost per eviction |
//! |---------|---------------------------------|-------------------|
//! | [`Lru`] | least recently touched entry    | O(1)              |
//! | [`Mru`] | most recently touched entry     | O(1)              |
//! | [`Lfu`] | lowest access frequency entry   | O(set size)       |
//!
//! Custom policies are ordinary values implementing the trait; they may walk
//! the full order in either direction and combine the entry metadata (key,
//! value, creation time, access time, frequency) however they like.

use crate::set::{EntryRef, SetView};

pub mod lfu;
pub mod lru;
pub mod mru;

pub use lfu::Lfu;
pub use lru::Lru;
pub use mru::Mru;

/// Selects the entry a full set evicts to make room for a new key.
///
/// `select` is invoked by a set's put while that set's lock is held, and only
/// when a new key is being inserted into a full set — never on an update to
/// an existing key. The view is a stable snapshot: no concurrent mutation of
/// the set can interleave with the selection.
///
/// The returned [`EntryRef`] must identify an entry of the given view.
/// Because the reference borrows from the view, an entry of a different set
/// cannot be returned; returning `None` is a contract violation that aborts
/// the insert with a panic.
///
/// # Example
///
/// ```
/// use waycache::policy::ReplacementPolicy;
/// use waycache::set::{EntryRef, SetView};
///
/// /// Evicts the oldest entry by creation time, regardless of recency.
/// struct EvictOldest;
///
/// impl<K, V> ReplacementPolicy<K, V> for EvictOldest {
///     fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
///         set.iter().min_by_key(|entry| entry.create_time())
///     }
/// }
/// ```
pub trait ReplacementPolicy<K, V> {
    /// Picks the victim from a read-only view of the full set.
    fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>>;
}

/// Shared policies forward to their target, so an `Arc<dyn ReplacementPolicy>`
/// singleton can be installed anywhere a policy value is expected.
impl<K, V, P> ReplacementPolicy<K, V> for std::sync::Arc<P>
where
    P: ReplacementPolicy<K, V> + ?Sized,
{
    fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
        (**self).select(set)
    }
}
