//! Benchmarks for queue operations and structural transforms.

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ringq::{Queue, QueueArena};

const N: usize = 1024;

fn filled(seed: u64) -> (QueueArena, Queue<QueueArena>) {
    let mut arena = QueueArena::with_capacity(N + 1);
    let q = Queue::try_new(&mut arena).unwrap();

    let mut state = seed;
    for _ in 0..N {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let bytes = (state >> 16).to_be_bytes();
        q.try_push_back(&mut arena, &bytes).unwrap();
    }
    (arena, q)
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    group.bench_function("push_back_pop_front", |b| {
        let mut arena: QueueArena = QueueArena::with_capacity(16);
        let q = Queue::try_new(&mut arena).unwrap();
        b.iter(|| {
            q.try_push_back(&mut arena, black_box(b"payload")).unwrap();
            black_box(q.pop_front(&mut arena, None).unwrap())
        });
    });

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");

    group.bench_function("sort/1024", |b| {
        b.iter_batched(
            || filled(9),
            |(mut arena, q)| {
                q.sort(&mut arena);
                arena
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("reverse/1024", |b| {
        let (mut arena, q) = filled(9);
        b.iter(|| q.reverse(&mut arena));
    });

    group.bench_function("descend/1024", |b| {
        b.iter_batched(
            || filled(9),
            |(mut arena, q)| {
                black_box(q.descend(&mut arena));
                arena
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_transforms);
criterion_main!(benches);
