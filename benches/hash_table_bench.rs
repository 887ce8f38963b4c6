use chained_hashmap::HashTable;
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

fn filled(seed: u64, n: usize) -> (HashTable<String, u64>, Vec<String>) {
    let mut m = HashTable::new();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.put(k.clone(), i as u64);
    }
    (m, keys)
}

// 10k indices into `0..n` drawn with a second LCG.
fn picks(n: usize) -> Vec<usize> {
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..10_000)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            (s as usize) % n
        })
        .collect()
}

fn bench_put_fresh_100k(c: &mut Criterion) {
    c.bench_function("table::put_fresh_100k", |b| {
        b.iter_batched(
            HashTable::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_overwrite_100k(c: &mut Criterion) {
    c.bench_function("table::put_overwrite_100k", |b| {
        b.iter_batched(
            || filled(2, 100_000),
            |(mut m, keys)| {
                for (i, k) in keys.into_iter().enumerate() {
                    m.put(k, i as u64 + 1);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("table::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5, 110_000);
                let targets: Vec<String> = picks(keys.len()).into_iter().map(|i| keys[i].clone()).collect();
                (m, targets)
            },
            |(mut m, targets)| {
                for k in &targets {
                    black_box(m.remove(k.as_str()));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("table::get_hit_10k_on_100k", |b| {
        let (m, keys) = filled(7, 100_000);
        let queries: Vec<String> = picks(keys.len()).into_iter().map(|i| keys[i].clone()).collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k.as_str()));
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("table::get_miss_10k_on_100k", |b| {
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

fn bench_iter_and_cursor(c: &mut Criterion) {
    c.bench_function("table::iter_all_100k", |b| {
        let (m, _) = filled(999, 100_000);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("table::cursor_remove_half_100k", |b| {
        b.iter_batched(
            || filled(1001, 100_000).0,
            |mut m| {
                {
                    let mut cur = m.cursor_mut();
                    while let Ok((_k, v)) = cur.next() {
                        if *v % 2 == 0 {
                            let _ = cur.remove();
                        }
                    }
                }
                black_box(m)
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
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh_100k, bench_put_overwrite_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_get_hit_10k,
              bench_get_miss_10k,
              bench_iter_and_cursor
}
criterion_main!(benches_put, benches_ops);
