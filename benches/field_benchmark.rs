/*
 * Magnetism Simulation Benchmark
 *
 * Measures the per-frame hot paths: field queries, tracing a whole scene
 * (sequential and with rayon), and ferrite re-orientation.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;
use std::time::Duration;

use magnetism::field;
use magnetism::{Bounds, Dipole, FieldLineTracer, FreeDipole, Scene};

// Random dipoles inside the default bounds, away from the edges
fn random_scene(sources: usize, ferrites: usize) -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scene = Scene::new();

    for _ in 0..sources {
        let position = vec2(rng.gen_range(50.0..350.0), rng.gen_range(50.0..350.0));
        let orientation = rng.gen_range(0.0..TAU);
        if let Ok(dipole) = Dipole::with_defaults(position, orientation) {
            scene.attach_source(dipole);
        }
    }

    for _ in 0..ferrites {
        let position = vec2(rng.gen_range(20.0..380.0), rng.gen_range(20.0..380.0));
        if let Ok(ferrite) = FreeDipole::new(position, 30.0, 6.0) {
            scene.attach_free_dipole(ferrite);
        }
    }

    scene
}

fn bench_field_direction(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_direction");

    for sources in [1, 3, 10].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(sources), sources, |b, &n| {
            let scene = random_scene(n, 0);
            let point = vec2(200.0, 200.0);
            b.iter(|| black_box(field::field_direction(black_box(point), scene.sources())));
        });
    }

    group.finish();
}

fn bench_trace_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_scene");
    let tracer = FieldLineTracer::default();
    let bounds = Bounds::default();

    for sources in [2, 3, 6].iter() {
        let scene = random_scene(*sources, 0);
        group.bench_with_input(BenchmarkId::new("sequential", sources), &scene, |b, scene| {
            b.iter(|| black_box(tracer.trace_scene(scene, &bounds, false)));
        });
        group.bench_with_input(BenchmarkId::new("parallel", sources), &scene, |b, scene| {
            b.iter(|| black_box(tracer.trace_scene(scene, &bounds, true)));
        });
    }

    group.finish();
}

fn bench_ferrite_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("ferrite_update");

    for ferrites in [1, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(ferrites), ferrites, |b, &n| {
            let mut scene = random_scene(3, n);
            b.iter(|| black_box(scene.update_free_dipoles()));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_field_direction, bench_trace_scene, bench_ferrite_update
}

criterion_main!(benches);
