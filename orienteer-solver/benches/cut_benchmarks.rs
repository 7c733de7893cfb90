//! Criterion benchmarks for cut generation and tour repair.
//!
//! Measures the per-candidate work the master callback does on an
//! over-budget tour: building every cut family and repairing the tour.
//! Instances are random planar point sets drawn from a seeded RNG so runs
//! stay comparable.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package orienteer-solver
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use orienteer_core::{EdgeWeightType, Instance, Tour};
use orienteer_solver::{CutFamily, CutLibrary, shorten_tour};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic instance generation.
const BENCHMARK_SEED: u64 = 42;

/// Node counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[20, 50, 100];

/// Side of the square the nodes are drawn from.
const AREA_SIZE: f64 = 1000.0;

/// A random instance whose budget is a third of a random tour through
/// every node, with that tour.
#[expect(
    clippy::expect_used,
    reason = "generated coordinates and rewards are always valid"
)]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "the budget only needs to be some fraction of the tour"
)]
fn over_budget_tour(size: usize, seed: u64) -> (Instance, Tour) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let coords: Vec<Coord<f64>> = (0..size)
        .map(|_| Coord {
            x: rng.gen_range(0.0..AREA_SIZE),
            y: rng.gen_range(0.0..AREA_SIZE),
        })
        .collect();
    let mut prices: Vec<i64> = (0..size).map(|_| rng.gen_range(1..100)).collect();
    if let Some(depot) = prices.first_mut() {
        *depot = 0;
    }
    let mut others: Vec<usize> = (1..size).collect();
    others.shuffle(&mut rng);
    let mut nodes = vec![0];
    nodes.extend(others);
    let tour = Tour::new(nodes);

    let unbounded = Instance::from_coordinates("unbounded", &coords, EdgeWeightType::Euc2d, prices.clone(), 0)
        .expect("generated instance should be valid");
    let budget = unbounded.distances().tour_length(tour.nodes()) / 3;
    let instance = Instance::from_coordinates("bench", &coords, EdgeWeightType::Euc2d, prices, budget)
        .expect("generated instance should be valid");
    (instance, tour)
}

fn bench_cut_families(c: &mut Criterion) {
    let mut group = c.benchmark_group("cut_families");
    for &size in PROBLEM_SIZES {
        let (instance, tour) = over_budget_tour(size, BENCHMARK_SEED);
        let length = instance.distances().tour_length(tour.nodes());
        let cuts = CutLibrary::new(&instance);

        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        for family in [CutFamily::BendersV0, CutFamily::BendersV1, CutFamily::BendersV2] {
            group.bench_with_input(BenchmarkId::new(family.as_str(), size), &size, |b, _| {
                b.iter(|| cuts.family(family, &tour, length, &[]));
            });
        }
    }
    group.finish();
}

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");
    for &size in PROBLEM_SIZES {
        let (instance, tour) = over_budget_tour(size, BENCHMARK_SEED);
        let length = instance.distances().tour_length(tour.nodes());
        let value = instance.route_value(tour.nodes());
        group.bench_with_input(BenchmarkId::new("shorten_tour", size), &size, |b, _| {
            b.iter(|| {
                shorten_tour(
                    &tour,
                    instance.distances(),
                    instance.prices(),
                    length,
                    instance.budget(),
                    value,
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cut_families, bench_repair);
criterion_main!(benches);
