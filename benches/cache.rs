use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use waycache::cache::SetAssociativeCache;
use waycache::policy::Mru;

fn bench_put_get_hot(c: &mut Criterion) {
    c.bench_function("cache_put_get_hot", |b| {
        b.iter_batched(
            || {
                let cache: SetAssociativeCache<u64, u64> = SetAssociativeCache::new(64, 16);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("cache_eviction_churn", |b| {
        b.iter_batched(
            || {
                let cache: SetAssociativeCache<u64, u64> = SetAssociativeCache::new(64, 16);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_mru_eviction_churn(c: &mut Criterion) {
    c.bench_function("cache_mru_eviction_churn", |b| {
        b.iter_batched(
            || {
                let cache: SetAssociativeCache<u64, u64> =
                    SetAssociativeCache::try_with_policy(64, 16, Mru).unwrap();
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_zipf_like_workload(c: &mut Criterion) {
    c.bench_function("cache_mixed_workload", |b| {
        b.iter_batched(
            || {
                let cache: SetAssociativeCache<u64, u64> = SetAssociativeCache::new(64, 16);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                (cache, StdRng::seed_from_u64(42))
            },
            |(cache, mut rng)| {
                for _ in 0..4096 {
                    // 80% of traffic on an eighth of the key space.
                    let key = if rng.gen_ratio(4, 5) {
                        rng.gen_range(0..256u64)
                    } else {
                        rng.gen_range(0..2048u64)
                    };
                    if rng.gen_ratio(3, 4) {
                        let _ = std::hint::black_box(cache.get(&key));
                    } else {
                        cache.put(key, key);
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_put_get_hot,
    bench_eviction_churn,
    bench_mru_eviction_churn,
    bench_zipf_like_workload
);
criterion_main!(benches);
