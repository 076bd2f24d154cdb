use consensus_axis::config::CultureParams;
use consensus_axis::consensus::{ConsensusDetector, ConsensusMode, DetectorOptions};
use consensus_axis::cultures::Culture;
use consensus_axis::metric::inversion_distance;
use consensus_axis::{InversionEngine, WeightedProfile};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

fn setup_profile() -> WeightedProfile<u32> {
    let params = CultureParams {
        num_votes: 5000,
        num_alternatives: 6,
        phi: 0.3,
        ..Default::default()
    };
    let mut rng = fastrand::Rng::with_seed(2024);
    Culture::Mallows
        .generate(&mut rng, &params)
        .expect("Failed to generate profile")
}

fn criterion_benchmark(c: &mut Criterion) {
    let forward: Vec<u32> = (0..12).collect();
    let mut shuffled = forward.clone();
    fastrand::Rng::with_seed(9).shuffle(&mut shuffled);

    c.bench_function("inversion_distance (n=12)", |b| {
        b.iter(|| inversion_distance(black_box(&forward), black_box(&shuffled)))
    });

    c.bench_function("mahonian_row (n=34, cold)", |b| {
        b.iter(|| InversionEngine::new().mahonian_row(black_box(34)))
    });

    let profile = setup_profile();
    let engine = Arc::new(InversionEngine::with_capacity(6));
    let sequential = ConsensusDetector::new(engine.clone());
    let parallel = ConsensusDetector::with_options(engine, DetectorOptions { parallel: true });

    c.bench_function("find_axis strict (mallows, 5k votes)", |b| {
        b.iter(|| sequential.find_axis(black_box(&profile), ConsensusMode::Strict))
    });
    c.bench_function("find_axis flexible parallel (mallows, 5k votes)", |b| {
        b.iter(|| parallel.find_axis(black_box(&profile), ConsensusMode::Flexible))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
