//! Benchmarks for the per-frame field update and the O(N²) edge pass.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dotfield::{FieldConfig, ParticleField, Vec2};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for count in [50usize, 200, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut field = ParticleField::new(
                FieldConfig {
                    count,
                    ..FieldConfig::default()
                },
                1280.0,
                720.0,
            );
            let pointer = Some(Vec2::new(640.0, 360.0));
            b.iter(|| field.step(black_box(pointer)));
        });
    }

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_links");

    for count in [50usize, 200, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let field = ParticleField::new(
                FieldConfig {
                    count,
                    ..FieldConfig::default()
                },
                1280.0,
                720.0,
            );
            let mut links = Vec::with_capacity(field.max_links());
            b.iter(|| {
                field.collect_links(&mut links);
                black_box(links.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_links);
criterion_main!(benches);
