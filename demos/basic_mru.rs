use waycache::cache::SetAssociativeCache;
use waycache::policy::Mru;

fn main() {
    let cache: SetAssociativeCache<u32, String> =
        SetAssociativeCache::try_with_policy(2, 1, Mru).expect("valid geometry");

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    cache.put(3, "gamma".to_string());

    println!("contains 1? {}", cache.contains(&1));
    println!("contains 2? {}", cache.contains(&2));
}

// Expected output:
// contains 1? true
// contains 2? false
//
// Explanation: key 2 was the most recently touched entry when key 3 arrived,
// so MRU evicts it; the oldest entry survives.
