use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dynamic_array::DynamicArray;
use rand::{Rng as _, RngCore, SeedableRng, rngs::StdRng};
use std::hint::black_box;

struct Rng(StdRng);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    fn values(&mut self, count: usize) -> Vec<u64> {
        std::iter::repeat_with(|| self.0.next_u64())
            .take(count)
            .collect()
    }

    fn indices(&mut self, count: usize, max_len: usize) -> Vec<usize> {
        (0..count).map(|i| self.0.random_range(0..=i.min(max_len))).collect()
    }
}

fn push(c: &mut Criterion) {
    let mut rng = Rng::new(42);
    let values = rng.values(1 << 16);

    let mut group = c.benchmark_group("push");
    group.bench_function("dynamic-array", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for &v in &values {
                array.push(v);
            }
            black_box(array)
        })
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for &v in &values {
                vec.push(v);
            }
            black_box(vec)
        })
    });
    group.finish();
}

fn insert_remove(c: &mut Criterion) {
    let mut rng = Rng::new(7);
    let mut group = c.benchmark_group("insert-remove");
    for count in [256, 4096] {
        let values = rng.values(count);
        let indices = rng.indices(count, count);

        group.bench_with_input(BenchmarkId::new("dynamic-array", count), &count, |b, _| {
            b.iter(|| {
                let mut array = DynamicArray::new();
                for (&v, &i) in values.iter().zip(&indices) {
                    array.insert(i, v);
                }
                while !array.is_empty() {
                    array.remove(array.len() / 2);
                }
                black_box(array)
            })
        });
        group.bench_with_input(BenchmarkId::new("vec", count), &count, |b, _| {
            b.iter(|| {
                let mut vec = Vec::new();
                for (&v, &i) in values.iter().zip(&indices) {
                    vec.insert(i, v);
                }
                while !vec.is_empty() {
                    vec.remove(vec.len() / 2);
                }
                black_box(vec)
            })
        });
    }
    group.finish();
}

fn clone(c: &mut Criterion) {
    let mut rng = Rng::new(3);
    let strings: DynamicArray<String> = rng
        .values(1 << 12)
        .into_iter()
        .map(|v| v.to_string())
        .collect();
    let mut target = DynamicArray::with_capacity(strings.len());

    c.bench_function("clone", |b| b.iter(|| black_box(strings.clone())));
    c.bench_function("clone-from-in-place", |b| {
        b.iter(|| {
            target.clone_from(&strings);
            black_box(target.len())
        })
    });
}

criterion_group!(benches, push, insert_remove, clone);
criterion_main!(benches);
