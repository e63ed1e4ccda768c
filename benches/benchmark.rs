use criterion::{Criterion, black_box, criterion_group, criterion_main};
use local_vec::{LocalVec, TightLocalVec};
use rand::{RngCore, SeedableRng, rngs::StdRng};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<u64> = (0..(1 << 16)).map(|_| rng.next_u64()).collect();

    c.bench_function("local_vec push", |b| {
        b.iter(|| {
            let mut vec = LocalVec::<u64, usize>::new();
            for &value in &values {
                vec.push(value);
            }
            black_box(vec.len())
        })
    });

    c.bench_function("tight push", |b| {
        b.iter(|| {
            let mut vec = TightLocalVec::<u64, usize>::with_capacity(values.len());
            for &value in &values {
                vec.push(value);
            }
            black_box(vec.len())
        })
    });

    c.bench_function("vec push", |b| {
        b.iter(|| {
            let mut vec = Vec::<u64>::new();
            for &value in &values {
                vec.push(value);
            }
            black_box(vec.len())
        })
    });

    let local: LocalVec<u64, usize> = values.iter().copied().collect();
    c.bench_function("local_vec sum", |b| {
        b.iter(|| local.iter().copied().sum::<u64>())
    });

    c.bench_function("vec sum", |b| b.iter(|| values.iter().copied().sum::<u64>()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
