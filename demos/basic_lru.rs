use waycache::cache::SetAssociativeCache;

fn main() {
    // One set of two entries keeps the eviction order visible.
    let cache: SetAssociativeCache<u32, String> = SetAssociativeCache::new(2, 1);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {value}");
    }

    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
}

// Expected output:
// hit 1: alpha
// contains 2? false
//
// Explanation: capacity=2 per set; after get(&1), key 1 is the most recently
// touched and key 2 the least. Inserting key 3 evicts key 2 under LRU.
