// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end simulation behaviour of the burst engine
//!
//! Covers validation, determinism, firing policies and parallel evaluation.

use msnn_npu_burst_engine::{FiringPolicy, MultiSpikingNetwork, SimulationOptions};
use msnn_npu_neural::MsnnError;

fn reference_network() -> MultiSpikingNetwork {
    MultiSpikingNetwork::new(vec![3, 5, 1], 4, 6, 80.0).expect("Failed to create network")
}

fn xor_style_inputs() -> Vec<Vec<f64>> {
    vec![vec![0.0], vec![0.0], vec![]]
}

#[test]
fn test_delay_overrun_rejected() {
    let network = reference_network();
    let err = network.simulate(5, 6, &xor_style_inputs()).unwrap_err();
    assert_eq!(
        err,
        MsnnError::DelayOverrunsSimulation {
            max_output_delay: 6,
            duration: 5
        }
    );
}

#[test]
fn test_input_count_mismatch_rejected() {
    let network = reference_network();
    let inputs = vec![vec![0.0], vec![0.0]];
    let err = network.simulate(10, 6, &inputs).unwrap_err();
    assert_eq!(err, MsnnError::InputCountMismatch { expected: 3, actual: 2 });
}

#[test]
fn test_delay_equal_to_duration_accepted() {
    let network = reference_network();
    assert!(network.simulate(6, 6, &xor_style_inputs()).is_ok());
}

#[test]
fn test_reference_network_produces_output_spike() {
    let network = reference_network();
    let outputs = network.simulate(40, 6, &xor_style_inputs()).unwrap();

    assert_eq!(outputs.len(), 1);
    assert!(!outputs[0].is_empty(), "output neuron never fired");
    assert!(outputs[0].iter().all(|t| (0.0..40.0).contains(&t)));
}

#[test]
fn test_silent_network_never_fires() {
    let network = reference_network();
    let inputs: Vec<Vec<f64>> = vec![vec![], vec![], vec![]];
    let output = network.run(40, 6, &inputs).unwrap();

    for layer in output.layers.iter().skip(1) {
        assert!(layer.iter().all(|train| train.is_empty()));
    }
    assert_eq!(output.stats.spikes_per_layer, vec![0, 0, 0]);
}

#[test]
fn test_repeated_runs_identical() {
    let network = reference_network();
    let inputs = vec![vec![0.0, 12.0], vec![6.0], vec![0.0]];
    let first = network.run(40, 6, &inputs).unwrap();
    let second = network.run(40, 6, &inputs).unwrap();
    assert_eq!(first.layers, second.layers);
}

#[test]
fn test_single_spike_policy_caps_every_train() {
    let network = reference_network();
    let output = network.run(40, 6, &xor_style_inputs()).unwrap();
    for layer in output.layers.iter().skip(1) {
        assert!(layer.iter().all(|train| train.len() <= 1));
    }
}

#[test]
fn test_unlimited_policy_allows_repeated_firing() {
    let network = reference_network().with_options(SimulationOptions {
        firing_policy: FiringPolicy::Unlimited,
        ..SimulationOptions::default()
    });
    let output = network.run(40, 6, &xor_style_inputs()).unwrap();

    let hidden = output.layer(1).unwrap();
    assert!(hidden.iter().any(|train| train.len() > 1));
    for train in hidden {
        // strictly one spike per tick at most, ascending
        assert!(train.as_slice().windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_at_most_policy_respected() {
    let network = reference_network().with_options(SimulationOptions {
        firing_policy: FiringPolicy::AtMost(2),
        ..SimulationOptions::default()
    });
    let output = network.run(40, 6, &xor_style_inputs()).unwrap();
    for layer in output.layers.iter().skip(1) {
        assert!(layer.iter().all(|train| train.len() <= 2));
    }
    assert!(output.layer(1).unwrap().iter().any(|train| train.len() == 2));
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = MultiSpikingNetwork::new(vec![4, 96, 70, 3], 3, 9, 40.0)
        .unwrap()
        .with_options(SimulationOptions {
            firing_policy: FiringPolicy::Unlimited,
            parallel_neuron_threshold: usize::MAX,
        });
    let mut parallel = sequential.clone();
    parallel.set_options(SimulationOptions {
        firing_policy: FiringPolicy::Unlimited,
        parallel_neuron_threshold: 1,
    });

    let inputs = vec![vec![0.0], vec![2.0], vec![], vec![1.0, 5.0]];
    let a = sequential.run(30, 9, &inputs).unwrap();
    let b = parallel.run(30, 9, &inputs).unwrap();
    assert_eq!(a.layers, b.layers);
    assert_eq!(a.stats.neuron_evaluations, b.stats.neuron_evaluations);
}

#[test]
fn test_weights_change_outcome() {
    let mut network = reference_network();
    let layer_shape = network.weights().layer_shape(1).unwrap();
    for x in 0..layer_shape.0 {
        for y in 0..layer_shape.1 {
            for z in 0..layer_shape.2 {
                network.weights_mut().set(1, x, y, z, 0.0).unwrap();
            }
        }
    }
    let outputs = network.simulate(40, 6, &xor_style_inputs()).unwrap();
    assert!(outputs[0].is_empty());
}

#[test]
fn test_input_layer_untouched() {
    let network = reference_network();
    let inputs = xor_style_inputs();
    let output = network.run(40, 6, &inputs).unwrap();
    let recorded: Vec<Vec<f64>> = output
        .layer(0)
        .unwrap()
        .iter()
        .map(|train| train.as_slice().to_vec())
        .collect();
    assert_eq!(recorded, inputs);
}

#[test]
fn test_output_serializes_for_presentation() {
    let network = reference_network();
    let output = network.run(10, 6, &xor_style_inputs()).unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["layers"][2][0], serde_json::json!([5.0]));
    assert_eq!(json["stats"]["ticks"], serde_json::json!(10));
}
