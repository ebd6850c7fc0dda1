// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Membrane potential evaluation
//!
//! Pure reductions over every spike recorded so far. Cost grows with
//! `sources × synapses × recorded spikes`, so it rises with simulated time.

use ndarray::ArrayView2;

use crate::models::{NeuronModel, SRMModel, SRMParameters};
use crate::synapse::{DelaySchedule, WeightTensor};
use crate::types::{MsnnError, Result, SpikeTrain};

/// Potential of one neuron from its incoming weight view
///
/// # Arguments
/// * `incoming` - `(source, synapse)` weights of the destination neuron
/// * `presynaptic_trains` - spike trains of the previous layer, one per source
/// * `last_spike` - the neuron's own last spike, `None` if it never fired
/// * `delays` - synapse delay schedule
/// * `time` - current simulation time
///
/// Inputs are assumed consistent: `presynaptic_trains.len()` equals the
/// number of rows of `incoming`, and the delay schedule covers every column.
#[inline]
pub fn membrane_potential_with<M: NeuronModel>(
    model: &M,
    params: &M::Parameters,
    incoming: ArrayView2<'_, f64>,
    presynaptic_trains: &[SpikeTrain],
    last_spike: Option<f64>,
    delays: &DelaySchedule,
    time: f64,
) -> f64 {
    debug_assert_eq!(incoming.nrows(), presynaptic_trains.len());
    debug_assert_eq!(incoming.ncols(), delays.len());

    let mut potential = 0.0;
    for (weights, train) in incoming.outer_iter().zip(presynaptic_trains) {
        if train.is_empty() {
            continue;
        }
        for (&weight, &delay) in weights.iter().zip(delays.as_slice()) {
            let arrival_offset = time - delay as f64;
            for spike_time in train.iter() {
                potential += weight * model.post_synaptic_potential(arrival_offset - spike_time, params);
            }
        }
    }

    // No prior spike → elapsed time is -inf → kernel contributes 0
    let since_last_spike = last_spike.map_or(f64::NEG_INFINITY, |last| time - last);
    potential + model.refractoriness(since_last_spike, params)
}

/// Potential of neuron `destination` in layer `layer` at `time`
///
/// # Errors
/// - `MsnnError::IndexOutOfBounds` if the neuron does not exist in `weights`
/// - `MsnnError::InputCountMismatch` if `presynaptic_trains` does not have one
///   train per source neuron
/// - `MsnnError::InvalidTopology` if the delay schedule does not match the
///   synapse count
#[allow(clippy::too_many_arguments)]
pub fn membrane_potential(
    weights: &WeightTensor,
    presynaptic_trains: &[SpikeTrain],
    last_spike: Option<f64>,
    delays: &DelaySchedule,
    params: &SRMParameters,
    layer: usize,
    destination: usize,
    time: f64,
) -> Result<f64> {
    let incoming = weights
        .incoming(layer, destination)
        .ok_or(MsnnError::IndexOutOfBounds {
            layer,
            destination,
            source_neuron: 0,
            synapse: 0,
        })?;

    if incoming.nrows() != presynaptic_trains.len() {
        return Err(MsnnError::InputCountMismatch {
            expected: incoming.nrows(),
            actual: presynaptic_trains.len(),
        });
    }
    if incoming.ncols() != delays.len() {
        return Err(MsnnError::InvalidTopology(format!(
            "delay schedule has {} entries for {} synapses per connection",
            delays.len(),
            incoming.ncols()
        )));
    }

    Ok(membrane_potential_with(
        &SRMModel,
        params,
        incoming,
        presynaptic_trains,
        last_spike,
        delays,
        time,
    ))
}
