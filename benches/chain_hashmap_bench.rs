use chain_hashmap::ChainHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (ChainHashMap<String, u64>, Vec<String>) {
    let mut m = ChainHashMap::new();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k.clone(), i as u64);
    }
    (m, keys)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("chain::insert_fresh_100k", |b| {
        b.iter_batched(
            ChainHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_identity_u64_100k(c: &mut Criterion) {
    c.bench_function("chain::insert_identity_u64_100k", |b| {
        b.iter_batched(
            || ChainHashMap::<u64, u64, _>::with_key_fns(|k: &u64| *k, |a: &u64, b: &u64| a == b),
            |mut m| {
                for i in 0..100_000u64 {
                    m.insert(i, i + 1);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_replace_10k(c: &mut Criterion) {
    c.bench_function("chain::replace_10k_on_100k", |b| {
        b.iter_batched(
            || filled(3, 100_000),
            |(mut m, keys)| {
                for (i, k) in keys.into_iter().take(10_000).enumerate() {
                    black_box(m.insert(k, i as u64));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("chain::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5, 110_000);
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_remove: Vec<String> = sel.into_iter().map(|i| keys[i].clone()).collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in &to_remove {
                    black_box(m.remove(k.as_str()));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("chain::get_hit_10k_on_100k", |b| {
        let (m, keys) = filled(7, 100_000);
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k.as_str()));
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("chain::get_miss_10k_on_100k", |b| {
        let (m, _) = filled(11, 100_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(m.get(k.as_str()));
            }
        })
    });
}

fn bench_delete_with_100k(c: &mut Criterion) {
    c.bench_function("chain::delete_with_100k", |b| {
        b.iter_batched(
            || filled(13, 100_000).0,
            |m| {
                let mut total = 0u64;
                m.delete_with(|k| drop(black_box(k)), |v| total = total.wrapping_add(v));
                black_box(total)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_identity_u64_100k, bench_replace_10k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_get_hit_10k,
              bench_get_miss_10k,
              bench_delete_with_100k
}
criterion_main!(benches_insert, benches_ops);
