//! Per-frame cost of geometry generation and compositing.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use duplex::{compositor::DrawCall, HelixAnimation, Options};

fn generate_benchmark(c: &mut Criterion) {
    let animation = HelixAnimation::new(&Options::default()).unwrap();
    let _ = c.bench_function("generate_20_pairs", |b| {
        b.iter(|| black_box(animation.generate()))
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_and_render");

    for base_pairs in [20_u32, 100, 1000] {
        let mut options = Options::default();
        options.helix.base_pairs = base_pairs;
        let mut animation = HelixAnimation::new(&options).unwrap();
        let mut calls: Vec<DrawCall> =
            Vec::with_capacity(base_pairs as usize * 4);

        let _ = group.bench_function(format!("{base_pairs}_pairs"), |b| {
            b.iter(|| {
                calls.clear();
                black_box(animation.update_and_render(&mut calls))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, generate_benchmark, frame_benchmark);
criterion_main!(benches);
