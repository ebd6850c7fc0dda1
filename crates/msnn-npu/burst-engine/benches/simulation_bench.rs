// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulation loop benchmarks
//!
//! Measures full runs for the reference network and a wider network where
//! rayon evaluation kicks in.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use msnn_npu_burst_engine::{FiringPolicy, MultiSpikingNetwork, SimulationOptions};

fn bench_reference_network(c: &mut Criterion) {
    let network = MultiSpikingNetwork::new(vec![3, 5, 1], 4, 6, 80.0).unwrap();
    let inputs = vec![vec![0.0], vec![0.0], vec![0.0]];

    c.bench_function("reference_network_40_ticks", |b| {
        b.iter(|| network.simulate(black_box(40), 6, black_box(&inputs)).unwrap())
    });
}

fn bench_wide_network(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_network_unlimited");
    let inputs: Vec<Vec<f64>> = (0..32).map(|i| vec![(i % 8) as f64]).collect();

    for threshold in [usize::MAX, 64] {
        let network = MultiSpikingNetwork::new(vec![32, 256, 64, 8], 8, 16, 80.0)
            .unwrap()
            .with_options(SimulationOptions {
                firing_policy: FiringPolicy::Unlimited,
                parallel_neuron_threshold: threshold,
            });
        let label = if threshold == usize::MAX { "sequential" } else { "rayon" };
        group.bench_with_input(BenchmarkId::from_parameter(label), &network, |b, network| {
            b.iter(|| network.run(black_box(50), 16, &inputs).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reference_network, bench_wide_network);
criterion_main!(benches);
