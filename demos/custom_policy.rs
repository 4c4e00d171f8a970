use waycache::cache::SetAssociativeCache;
use waycache::policy::ReplacementPolicy;
use waycache::set::{EntryRef, SetView};

/// Evicts the entry with the fewest accesses; among equally cold entries the
/// most recently touched one goes, protecting long-lived residents.
struct ColdestNewest;

impl<K, V> ReplacementPolicy<K, V> for ColdestNewest {
    fn select<'a>(&self, set: SetView<'a, K, V>) -> Option<EntryRef<'a, K, V>> {
        set.iter_descending().min_by_key(|entry| entry.frequency())
    }
}

fn main() {
    let cache: SetAssociativeCache<u32, &str> =
        SetAssociativeCache::try_with_policy(3, 1, ColdestNewest).expect("valid geometry");

    cache.put(1, "one");
    cache.put(2, "two");
    cache.put(3, "three");

    // Keys 1 and 2 get extra hits; key 3 stays cold.
    cache.get(&1);
    cache.get(&2);

    cache.put(4, "four");

    println!("contains 3? {}", cache.contains(&3));
    let frequency = cache.peek_with(&1, |entry| entry.frequency());
    println!("frequency of 1: {frequency:?}");
}

// Expected output:
// contains 3? false
// frequency of 1: Some(2)
