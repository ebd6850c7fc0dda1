// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Multi-synapse spiking network
//!
//! Owns everything that is fixed at construction: topology, weight tensor,
//! delay schedule and SRM parameters. Simulation borrows the network
//! immutably; only [`MultiSpikingNetwork::weights_mut`] can change weights.

use msnn_config::{NetworkConfig, SimulationConfig};
use msnn_npu_neural::{
    compute_delays, DelaySchedule, ModelParameters, MsnnError, NetworkTopology, Result,
    SRMParameters, SpikeTrain, WeightTensor,
};
use tracing::debug;

use crate::simulation::{run_simulation, SimulationOptions, SimulationOutput};

#[derive(Debug, Clone)]
pub struct MultiSpikingNetwork {
    topology: NetworkTopology,
    weights: WeightTensor,
    delays: DelaySchedule,
    params: SRMParameters,
    max_output_delay: u32,
    options: SimulationOptions,
}

impl MultiSpikingNetwork {
    /// Build a network with every weight at its initial value
    ///
    /// # Arguments
    /// * `layer_sizes` - neurons per layer, input layer first
    /// * `synapses_per_connection` - parallel synapses between each connected pair
    /// * `max_output_delay` - latest time an output may be expected; sets the
    ///   delay schedule and τ = `max_output_delay + 1`
    /// * `refractoriness_decay` - τr of the refractoriness kernel
    ///
    /// # Errors
    /// - `MsnnError::InvalidTopology` for fewer than two layers, an empty
    ///   layer, or zero synapses per connection
    /// - `MsnnError::InvalidParameter` for a non-positive or non-finite
    ///   refractoriness decay
    ///
    /// # Example
    /// ```
    /// use msnn_npu_burst_engine::MultiSpikingNetwork;
    ///
    /// let network = MultiSpikingNetwork::new(vec![3, 5, 1], 4, 6, 80.0).unwrap();
    /// assert_eq!(network.delays().as_slice(), &[1, 2, 3, 4]);
    /// assert_eq!(network.time_decay(), 7.0);
    /// ```
    pub fn new(
        layer_sizes: Vec<usize>,
        synapses_per_connection: usize,
        max_output_delay: u32,
        refractoriness_decay: f64,
    ) -> Result<Self> {
        let topology = NetworkTopology::new(layer_sizes)?;
        let weights = WeightTensor::new(&topology, synapses_per_connection)?;
        let params = SRMParameters::for_output_delay(max_output_delay, refractoriness_decay);
        params
            .validate()
            .map_err(|reason| MsnnError::InvalidParameter(reason.to_string()))?;
        let delays = compute_delays(synapses_per_connection, max_output_delay);

        debug!(
            "[NETWORK] Built {:?} with {} synapses/connection ({} total), delays={:?}",
            topology.layer_sizes(),
            synapses_per_connection,
            weights.len(),
            delays.as_slice()
        );

        Ok(Self {
            topology,
            weights,
            delays,
            params,
            max_output_delay,
            options: SimulationOptions::default(),
        })
    }

    /// Build from the `[network]` and `[simulation]` configuration sections
    pub fn from_config(network: &NetworkConfig, simulation: &SimulationConfig) -> Result<Self> {
        Ok(Self::new(
            network.layer_sizes.clone(),
            network.synapses_per_connection,
            network.max_output_delay,
            network.refractoriness_decay,
        )?
        .with_options(SimulationOptions::from_config(simulation)))
    }

    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SimulationOptions) {
        self.options = options;
    }

    pub fn topology(&self) -> &NetworkTopology {
        &self.topology
    }

    pub fn weights(&self) -> &WeightTensor {
        &self.weights
    }

    /// Write access for an external learning procedure
    pub fn weights_mut(&mut self) -> &mut WeightTensor {
        &mut self.weights
    }

    pub fn delays(&self) -> &DelaySchedule {
        &self.delays
    }

    pub fn parameters(&self) -> &SRMParameters {
        &self.params
    }

    pub fn time_decay(&self) -> f64 {
        self.params.time_decay
    }

    pub fn refractoriness_decay(&self) -> f64 {
        self.params.refractoriness_decay
    }

    pub fn max_output_delay(&self) -> u32 {
        self.max_output_delay
    }

    pub fn synapses_per_connection(&self) -> usize {
        self.weights.synapses_per_connection()
    }

    /// Run the network and return the output layer's spike trains
    ///
    /// See [`run_simulation`] for the validation performed before the first tick.
    pub fn simulate<I: AsRef<[f64]>>(
        &self,
        duration: u32,
        max_output_delay: u32,
        inputs: &[I],
    ) -> Result<Vec<SpikeTrain>> {
        Ok(self
            .run(duration, max_output_delay, inputs)?
            .into_output_trains())
    }

    /// Run the network and return every layer's spike trains plus statistics
    pub fn run<I: AsRef<[f64]>>(
        &self,
        duration: u32,
        max_output_delay: u32,
        inputs: &[I],
    ) -> Result<SimulationOutput> {
        run_simulation(self, duration, max_output_delay, inputs, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FiringPolicy;

    #[test]
    fn test_reference_construction() {
        let network = MultiSpikingNetwork::new(vec![3, 5, 1], 4, 6, 80.0).unwrap();
        assert_eq!(network.topology().layer_sizes(), &[3, 5, 1]);
        assert_eq!(network.weights().layer_shape(1), Some((5, 3, 4)));
        assert_eq!(network.weights().layer_shape(2), Some((1, 5, 4)));
        assert_eq!(network.delays().as_slice(), &[1, 2, 3, 4]);
        assert_eq!(network.time_decay(), 7.0);
        assert_eq!(network.refractoriness_decay(), 80.0);
        assert_eq!(network.synapses_per_connection(), 4);
        assert_eq!(network.options().firing_policy, FiringPolicy::SingleSpike);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            MultiSpikingNetwork::new(vec![3], 4, 6, 80.0),
            Err(MsnnError::InvalidTopology(_))
        ));
        assert!(matches!(
            MultiSpikingNetwork::new(vec![3, 5, 1], 0, 6, 80.0),
            Err(MsnnError::InvalidTopology(_))
        ));
        assert!(matches!(
            MultiSpikingNetwork::new(vec![3, 5, 1], 4, 6, 0.0),
            Err(MsnnError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_from_config_defaults() {
        let network =
            MultiSpikingNetwork::from_config(&NetworkConfig::default(), &SimulationConfig::default())
                .unwrap();
        assert_eq!(network.topology().layer_sizes(), &[3, 5, 1]);
        assert_eq!(network.max_output_delay(), 6);
        assert_eq!(network.options().firing_policy, FiringPolicy::SingleSpike);
    }

    #[test]
    fn test_from_config_unlimited_policy() {
        let simulation = SimulationConfig {
            max_spikes_per_neuron: 0,
            ..SimulationConfig::default()
        };
        let network =
            MultiSpikingNetwork::from_config(&NetworkConfig::default(), &simulation).unwrap();
        assert_eq!(network.options().firing_policy, FiringPolicy::Unlimited);
    }

    #[test]
    fn test_weights_mut_is_the_write_path() {
        let mut network = MultiSpikingNetwork::new(vec![2, 1], 2, 2, 80.0).unwrap();
        network.weights_mut().set(1, 0, 1, 1, 0.5).unwrap();
        assert_eq!(network.weights().get(1, 0, 1, 1), Some(0.5));
        assert_eq!(network.weights().get(1, 0, 1, 0), Some(1.0));
    }
}
