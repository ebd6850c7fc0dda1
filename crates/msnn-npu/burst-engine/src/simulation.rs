// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Simulation Loop
//!
//! ## Algorithm (per tick `t`, per layer `w = 1..L`):
//! 1. Skip neurons that reached the firing-policy cap
//! 2. Evaluate every remaining neuron's membrane potential against the
//!    spikes already recorded in layer `w - 1` and its own last spike
//! 3. Record `t` on every neuron whose potential reached threshold
//!
//! Step 2 only reads spike history and step 3 only runs after step 2 has
//! finished for the whole layer, so evaluation order inside a layer never
//! matters and wide layers can be evaluated in parallel.

use std::sync::OnceLock;
use std::time::Instant;

use msnn_npu_neural::{
    membrane_potential_with, MsnnError, NeuronModel, Result, SRMModel, SpikeTrain,
};
use ndarray::Axis;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::firing_policy::FiringPolicy;
use crate::network::MultiSpikingNetwork;
use crate::simulation_state::SimulationState;
use crate::SimulationStats;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Layers at least this wide are evaluated with rayon
pub const DEFAULT_PARALLEL_NEURON_THRESHOLD: usize = 64;

/// Runtime-gated tracing config for spike emission.
/// Enable with:
/// - MSNN_NPU_TRACE_DYNAMICS=1
///   Optional filter:
/// - MSNN_NPU_TRACE_LAYER=<layer index>
struct DynamicsTraceCfg {
    enabled: bool,
    layer_filter: Option<usize>,
}

fn dynamics_trace_cfg() -> &'static DynamicsTraceCfg {
    static CFG: OnceLock<DynamicsTraceCfg> = OnceLock::new();
    CFG.get_or_init(|| {
        let enabled = std::env::var("MSNN_NPU_TRACE_DYNAMICS")
            .ok()
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let layer_filter = std::env::var("MSNN_NPU_TRACE_LAYER")
            .ok()
            .and_then(|v| v.parse().ok());

        DynamicsTraceCfg {
            enabled,
            layer_filter,
        }
    })
}

/// Knobs of a simulation run that do not change the network itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationOptions {
    pub firing_policy: FiringPolicy,
    pub parallel_neuron_threshold: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            firing_policy: FiringPolicy::SingleSpike,
            parallel_neuron_threshold: DEFAULT_PARALLEL_NEURON_THRESHOLD,
        }
    }
}

impl SimulationOptions {
    pub fn from_config(config: &msnn_config::SimulationConfig) -> Self {
        Self {
            firing_policy: FiringPolicy::from_spike_limit(config.max_spikes_per_neuron),
            parallel_neuron_threshold: config.parallel_neuron_threshold,
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationOutput {
    /// Spike trains of every layer, inputs included
    pub layers: Vec<Vec<SpikeTrain>>,
    pub stats: SimulationStats,
}

impl SimulationOutput {
    /// Spike trains of the output layer
    pub fn output_trains(&self) -> &[SpikeTrain] {
        self.layers.last().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn into_output_trains(mut self) -> Vec<SpikeTrain> {
        self.layers.pop().unwrap_or_default()
    }

    pub fn layer(&self, layer: usize) -> Option<&[SpikeTrain]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    /// First spike of each output neuron, `silent_value` for neurons that
    /// never fired
    ///
    /// This is the usual observed vector for `squared_error_loss` under
    /// single-spike coding.
    pub fn first_spike_times(&self, silent_value: f64) -> Vec<f64> {
        self.output_trains()
            .iter()
            .map(|train| train.first().unwrap_or(silent_value))
            .collect()
    }
}

/// Validate inputs, then run `duration` ticks of the network
///
/// # Errors
/// Raised before any tick executes:
/// - `MsnnError::InvalidParameter` for a zero duration or malformed input
///   spike times
/// - `MsnnError::InputCountMismatch` if `inputs.len()` differs from the
///   input layer size
/// - `MsnnError::DelayOverrunsSimulation` if `max_output_delay > duration`
pub fn run_simulation<I: AsRef<[f64]>>(
    network: &MultiSpikingNetwork,
    duration: u32,
    max_output_delay: u32,
    inputs: &[I],
    options: &SimulationOptions,
) -> Result<SimulationOutput> {
    if duration == 0 {
        return Err(MsnnError::InvalidParameter(
            "simulation duration must be at least 1 tick".to_string(),
        ));
    }
    let topology = network.topology();
    if inputs.len() != topology.input_size() {
        return Err(MsnnError::InputCountMismatch {
            expected: topology.input_size(),
            actual: inputs.len(),
        });
    }
    if max_output_delay > duration {
        return Err(MsnnError::DelayOverrunsSimulation {
            max_output_delay,
            duration,
        });
    }

    let input_trains = inputs
        .iter()
        .map(|times| SpikeTrain::try_from(times.as_ref().to_vec()))
        .collect::<Result<Vec<_>>>()?;

    if max_output_delay != network.max_output_delay() {
        warn!(
            "[SIMULATION] max_output_delay {} differs from the {} the delay schedule was built with",
            max_output_delay,
            network.max_output_delay()
        );
    }

    let mut state = SimulationState::new(topology, input_trains)?;
    debug!(
        "[SIMULATION] Starting run: layers={:?} ({} neurons), duration={}, longest delay={}, policy={:?}",
        topology.layer_sizes(),
        topology.neuron_count(),
        duration,
        network.delays().max_delay(),
        options.firing_policy
    );

    let started = Instant::now();
    let mut neuron_evaluations: u64 = 0;
    for _ in 0..duration {
        for layer in 1..topology.layer_count() {
            neuron_evaluations += step_layer(network, &mut state, layer, options)? as u64;
        }
        state.advance();
    }

    let stats = SimulationStats {
        ticks: state.time(),
        neuron_evaluations,
        spikes_per_layer: state.spike_counts(),
        processing_time_us: started.elapsed().as_micros() as u64,
    };
    info!(
        "[SIMULATION] Completed {} ticks: {} evaluations, {} spikes emitted, {} output spikes",
        stats.ticks,
        stats.neuron_evaluations,
        stats.total_emitted_spikes(),
        stats.spikes_per_layer.last().copied().unwrap_or(0)
    );

    Ok(SimulationOutput {
        layers: state.into_layers(),
        stats,
    })
}

/// Evaluate and fire one layer at the current tick
///
/// Returns the number of neurons evaluated.
fn step_layer(
    network: &MultiSpikingNetwork,
    state: &mut SimulationState,
    layer: usize,
    options: &SimulationOptions,
) -> Result<usize> {
    let tick = state.time();
    let time = tick as f64;
    let params = network.parameters();
    let delays = network.delays();
    let layer_weights = network
        .weights()
        .layer(layer)
        .ok_or_else(|| MsnnError::InvalidTopology(format!("no weights for layer {}", layer)))?;
    let policy = options.firing_policy;

    let (presynaptic, trains) = state.presynaptic_and_layer_mut(layer);

    let evaluate = |(neuron, train): (usize, &SpikeTrain)| -> Option<(usize, f64)> {
        if !policy.allows(train.len()) {
            return None;
        }
        let incoming = layer_weights.index_axis(Axis(0), neuron);
        let potential = membrane_potential_with(
            &SRMModel,
            params,
            incoming,
            presynaptic,
            train.last(),
            delays,
            time,
        );
        Some((neuron, potential))
    };

    let evaluated: Vec<(usize, f64)> = if trains.len() >= options.parallel_neuron_threshold {
        trains.par_iter().enumerate().filter_map(evaluate).collect()
    } else {
        trains.iter().enumerate().filter_map(evaluate).collect()
    };

    let trace_cfg = dynamics_trace_cfg();
    for &(neuron, potential) in &evaluated {
        if !SRMModel.should_fire(potential, params) {
            continue;
        }
        SimulationState::record_spike(trains, neuron, tick)?;
        if trace_cfg.enabled && trace_cfg.layer_filter.map_or(true, |l| l == layer) {
            trace!(
                "[SIMULATION] t={} layer={} neuron={} fired (potential={:.6})",
                tick,
                layer,
                neuron,
                potential
            );
        }
    }

    Ok(evaluated.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_network() -> MultiSpikingNetwork {
        MultiSpikingNetwork::new(vec![3, 5, 1], 4, 6, 80.0).unwrap()
    }

    #[test]
    fn test_zero_duration_rejected() {
        let network = reference_network();
        let inputs: Vec<Vec<f64>> = vec![vec![], vec![], vec![]];
        let err = run_simulation(&network, 0, 0, &inputs, &SimulationOptions::default())
            .unwrap_err();
        assert!(matches!(err, MsnnError::InvalidParameter(_)));
    }

    #[test]
    fn test_unsorted_input_rejected() {
        let network = reference_network();
        let inputs = vec![vec![3.0, 1.0], vec![], vec![]];
        let err = run_simulation(&network, 10, 6, &inputs, &SimulationOptions::default())
            .unwrap_err();
        assert!(matches!(err, MsnnError::InvalidParameter(_)));
    }

    #[test]
    fn test_hidden_layer_fires_at_tick_three() {
        // ε(1) + ε(2) per input with τ = 7 crosses 1.0 first at t = 3
        let network = reference_network();
        let inputs = vec![vec![0.0], vec![0.0], vec![]];
        let output =
            run_simulation(&network, 40, 6, &inputs, &SimulationOptions::default()).unwrap();

        let hidden = output.layer(1).unwrap();
        assert!(hidden.iter().all(|train| train.as_slice() == [3.0]));
        assert_eq!(output.output_trains()[0].as_slice(), &[5.0]);
        assert_eq!(output.first_spike_times(-1.0), vec![5.0]);
    }

    #[test]
    fn test_evaluation_count_single_spike() {
        let network = reference_network();
        let inputs = vec![vec![0.0], vec![0.0], vec![]];
        let output =
            run_simulation(&network, 10, 6, &inputs, &SimulationOptions::default()).unwrap();

        // hidden: 5 neurons × ticks 0..=3, output: 1 neuron × ticks 0..=5
        assert_eq!(output.stats.neuron_evaluations, 5 * 4 + 6);
        assert_eq!(output.stats.ticks, 10);
        assert_eq!(output.stats.spikes_per_layer, vec![2, 5, 1]);
    }

    #[test]
    fn test_silent_output_value() {
        let network = reference_network();
        let inputs: Vec<Vec<f64>> = vec![vec![], vec![], vec![]];
        let output =
            run_simulation(&network, 10, 6, &inputs, &SimulationOptions::default()).unwrap();
        assert_eq!(output.first_spike_times(16.0), vec![16.0]);
        assert_eq!(output.stats.total_emitted_spikes(), 0);
    }
}
