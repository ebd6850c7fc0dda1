// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron model traits

/// Response kernels and firing rule of a spiking neuron model
pub trait NeuronModel: Send + Sync {
    type Parameters: ModelParameters;

    fn model_name(&self) -> &'static str;

    /// Response at the soma to one pre-synaptic spike, `time` after it arrived
    fn post_synaptic_potential(&self, time: f64, params: &Self::Parameters) -> f64;

    /// Self-inhibition `time` after the neuron's own last spike
    fn refractoriness(&self, time: f64, params: &Self::Parameters) -> f64;

    fn should_fire(&self, membrane_potential: f64, params: &Self::Parameters) -> bool;
}

/// Parameter set of a neuron model
pub trait ModelParameters: Clone + Send + Sync {
    fn validate(&self) -> Result<(), &'static str>;

    fn parameter_count() -> usize;
}
