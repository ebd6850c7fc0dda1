// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! SimulationState - per-run spike history of every neuron.
//!
//! Key semantics:
//! - Layer 0 holds the caller's input trains and is never written by the engine.
//! - Every other train starts empty and only grows by the current tick's time.
//! - Time only moves forwards, one tick at a time.

use msnn_npu_neural::{MsnnError, NetworkTopology, Result, SpikeTrain};

#[derive(Debug, Clone)]
pub struct SimulationState {
    layers: Vec<Vec<SpikeTrain>>,
    time: u32,
}

impl SimulationState {
    /// Seed a run with one input train per input neuron
    ///
    /// # Errors
    /// `MsnnError::InputCountMismatch` if `inputs` does not have exactly one
    /// train per input neuron.
    pub fn new(topology: &NetworkTopology, inputs: Vec<SpikeTrain>) -> Result<Self> {
        if inputs.len() != topology.input_size() {
            return Err(MsnnError::InputCountMismatch {
                expected: topology.input_size(),
                actual: inputs.len(),
            });
        }

        let mut layers = Vec::with_capacity(topology.layer_count());
        layers.push(inputs);
        for &size in &topology.layer_sizes()[1..] {
            layers.push(vec![SpikeTrain::new(); size]);
        }

        Ok(Self { layers, time: 0 })
    }

    /// Current tick
    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn layer(&self, layer: usize) -> Option<&[SpikeTrain]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    /// Spikes recorded in each layer so far
    pub fn spike_counts(&self) -> Vec<usize> {
        self.layers
            .iter()
            .map(|trains| trains.iter().map(SpikeTrain::len).sum())
            .collect()
    }

    /// Previous layer (read-only) and `layer` itself (writable)
    ///
    /// `layer` must be in `1..layer_count`.
    pub(crate) fn presynaptic_and_layer_mut(
        &mut self,
        layer: usize,
    ) -> (&[SpikeTrain], &mut [SpikeTrain]) {
        let (before, from) = self.layers.split_at_mut(layer);
        (&before[layer - 1], &mut from[0])
    }

    /// Record a spike at the current tick
    pub(crate) fn record_spike(trains: &mut [SpikeTrain], neuron: usize, time: u32) -> Result<()> {
        trains[neuron].record(time as f64)
    }

    pub(crate) fn advance(&mut self) {
        self.time += 1;
    }

    pub fn into_layers(self) -> Vec<Vec<SpikeTrain>> {
        self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> NetworkTopology {
        NetworkTopology::new(vec![2, 3, 1]).unwrap()
    }

    #[test]
    fn test_seeded_inputs_and_empty_layers() {
        let inputs = vec![
            SpikeTrain::try_from(vec![0.0]).unwrap(),
            SpikeTrain::new(),
        ];
        let state = SimulationState::new(&topology(), inputs.clone()).unwrap();
        assert_eq!(state.time(), 0);
        assert_eq!(state.layer(0).unwrap(), inputs.as_slice());
        assert_eq!(state.layer(1).unwrap().len(), 3);
        assert!(state.layer(2).unwrap().iter().all(SpikeTrain::is_empty));
        assert_eq!(state.spike_counts(), vec![1, 0, 0]);
    }

    #[test]
    fn test_input_count_mismatch() {
        let err = SimulationState::new(&topology(), vec![SpikeTrain::new()]).unwrap_err();
        assert_eq!(err, MsnnError::InputCountMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_split_and_record() {
        let inputs = vec![SpikeTrain::new(), SpikeTrain::new()];
        let mut state = SimulationState::new(&topology(), inputs).unwrap();
        state.advance();
        state.advance();
        let time = state.time();
        {
            let (pre, current) = state.presynaptic_and_layer_mut(2);
            assert_eq!(pre.len(), 3);
            assert_eq!(current.len(), 1);
            SimulationState::record_spike(current, 0, time).unwrap();
        }
        assert_eq!(state.layer(2).unwrap()[0].as_slice(), &[2.0]);
        assert_eq!(state.spike_counts(), vec![0, 0, 1]);
    }
}
