// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Synaptic weight tensor
//!
//! Weights are addressed by four indices:
//! - `layer`: destination layer, `1..layer_count`
//! - `destination`: neuron index within the destination layer
//! - `source`: neuron index within the layer before it
//! - `synapse`: index among the parallel synapses of that connection
//!
//! Each destination layer owns one contiguous `(destination, source, synapse)`
//! array, so every weight is its own cell and can be updated without touching
//! any other.

use ndarray::{Array3, ArrayView2, ArrayView3};

use crate::types::{MsnnError, NetworkTopology, Result};
use crate::INITIAL_WEIGHT;

/// Owned weights of every synapse in the network
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTensor {
    /// Index 0 holds destination layer 1
    layers: Vec<Array3<f64>>,
    synapses_per_connection: usize,
}

impl WeightTensor {
    /// Allocate one weight per synapse, all set to [`INITIAL_WEIGHT`]
    ///
    /// # Errors
    /// `MsnnError::InvalidTopology` if `synapses_per_connection` is zero.
    pub fn new(topology: &NetworkTopology, synapses_per_connection: usize) -> Result<Self> {
        Self::filled(topology, synapses_per_connection, INITIAL_WEIGHT)
    }

    /// Allocate one weight per synapse, all set to `value`
    pub fn filled(
        topology: &NetworkTopology,
        synapses_per_connection: usize,
        value: f64,
    ) -> Result<Self> {
        if synapses_per_connection == 0 {
            return Err(MsnnError::InvalidTopology(
                "synapses per connection must be at least 1".to_string(),
            ));
        }

        let layers = topology
            .layer_sizes()
            .windows(2)
            .map(|pair| Array3::from_elem((pair[1], pair[0], synapses_per_connection), value))
            .collect();

        Ok(Self {
            layers,
            synapses_per_connection,
        })
    }

    #[inline]
    pub fn synapses_per_connection(&self) -> usize {
        self.synapses_per_connection
    }

    /// Number of network layers, input layer included
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len() + 1
    }

    /// `(destinations, sources, synapses)` for a destination layer
    pub fn layer_shape(&self, layer: usize) -> Option<(usize, usize, usize)> {
        self.layer(layer).map(|weights| weights.dim())
    }

    /// Read-only view of a destination layer's weights
    pub fn layer(&self, layer: usize) -> Option<ArrayView3<'_, f64>> {
        layer
            .checked_sub(1)
            .and_then(|idx| self.layers.get(idx))
            .map(|weights| weights.view())
    }

    /// `(source, synapse)` weights feeding one destination neuron
    pub fn incoming(&self, layer: usize, destination: usize) -> Option<ArrayView2<'_, f64>> {
        let weights = self.layer(layer)?;
        if destination >= weights.dim().0 {
            return None;
        }
        Some(weights.index_axis_move(ndarray::Axis(0), destination))
    }

    pub fn get(&self, layer: usize, destination: usize, source: usize, synapse: usize) -> Option<f64> {
        self.layer(layer)?
            .get((destination, source, synapse))
            .copied()
    }

    pub fn get_mut(
        &mut self,
        layer: usize,
        destination: usize,
        source: usize,
        synapse: usize,
    ) -> Option<&mut f64> {
        layer
            .checked_sub(1)
            .and_then(|idx| self.layers.get_mut(idx))?
            .get_mut((destination, source, synapse))
    }

    /// Overwrite a single synapse's weight
    ///
    /// # Errors
    /// `MsnnError::IndexOutOfBounds` if any index is outside the tensor.
    pub fn set(
        &mut self,
        layer: usize,
        destination: usize,
        source: usize,
        synapse: usize,
        value: f64,
    ) -> Result<()> {
        match self.get_mut(layer, destination, source, synapse) {
            Some(weight) => {
                *weight = value;
                Ok(())
            }
            None => Err(MsnnError::IndexOutOfBounds {
                layer,
                destination,
                source_neuron: source,
                synapse,
            }),
        }
    }

    /// Every weight with its `(layer, destination, source, synapse)` index
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize, usize), f64)> + '_ {
        self.layers.iter().enumerate().flat_map(|(idx, weights)| {
            weights
                .indexed_iter()
                .map(move |((x, y, z), &w)| ((idx + 1, x, y, z), w))
        })
    }

    /// Total number of synapses in the network
    pub fn len(&self) -> usize {
        self.layers.iter().map(|weights| weights.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the initial weight tensor for `layer_sizes`
///
/// # Errors
/// `MsnnError::InvalidTopology` for fewer than two layers, an empty layer,
/// or zero synapses per connection.
///
/// # Example
/// ```
/// use msnn_npu_neural::synapse::build_weights;
///
/// let weights = build_weights(&[3, 5, 1], 4).unwrap();
/// assert_eq!(weights.layer_shape(1), Some((5, 3, 4)));
/// assert_eq!(weights.layer_shape(2), Some((1, 5, 4)));
/// assert_eq!(weights.get(2, 0, 4, 3), Some(1.0));
/// ```
pub fn build_weights(layer_sizes: &[usize], synapses_per_connection: usize) -> Result<WeightTensor> {
    let topology = NetworkTopology::new(layer_sizes.to_vec())?;
    WeightTensor::new(&topology, synapses_per_connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_matches_topology() {
        let weights = build_weights(&[3, 5, 2], 4).unwrap();
        assert_eq!(weights.layer_count(), 3);
        assert_eq!(weights.layer_shape(0), None);
        assert_eq!(weights.layer_shape(1), Some((5, 3, 4)));
        assert_eq!(weights.layer_shape(2), Some((2, 5, 4)));
        assert_eq!(weights.layer_shape(3), None);
        assert_eq!(weights.len(), 5 * 3 * 4 + 2 * 5 * 4);
        assert!(weights.iter().all(|(_, w)| w == INITIAL_WEIGHT));
    }

    #[test]
    fn test_no_aliasing_between_synapses() {
        let mut weights = build_weights(&[3, 5, 1], 4).unwrap();
        weights.set(1, 2, 1, 3, 0.25).unwrap();

        for ((layer, x, y, z), w) in weights.iter() {
            if (layer, x, y, z) == (1, 2, 1, 3) {
                assert_eq!(w, 0.25);
            } else {
                assert_eq!(w, INITIAL_WEIGHT, "weight ({layer},{x},{y},{z}) changed");
            }
        }
    }

    #[test]
    fn test_get_mut_updates_single_cell() {
        let mut weights = build_weights(&[2, 2], 2).unwrap();
        *weights.get_mut(1, 0, 0, 0).unwrap() += 0.5;
        assert_eq!(weights.get(1, 0, 0, 0), Some(1.5));
        assert_eq!(weights.get(1, 0, 0, 1), Some(1.0));
        assert_eq!(weights.get(1, 1, 0, 0), Some(1.0));
    }

    #[test]
    fn test_incoming_view() {
        let mut weights = build_weights(&[3, 2], 4).unwrap();
        weights.set(1, 1, 2, 0, -1.0).unwrap();
        let incoming = weights.incoming(1, 1).unwrap();
        assert_eq!(incoming.dim(), (3, 4));
        assert_eq!(incoming[[2, 0]], -1.0);
        assert!(weights.incoming(1, 2).is_none());
        assert!(weights.incoming(0, 0).is_none());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut weights = build_weights(&[3, 2], 4).unwrap();
        let err = weights.set(1, 0, 0, 4, 0.0).unwrap_err();
        assert_eq!(
            err,
            MsnnError::IndexOutOfBounds {
                layer: 1,
                destination: 0,
                source_neuron: 0,
                synapse: 4
            }
        );
        assert!(weights.set(0, 0, 0, 0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_preconditions() {
        assert!(matches!(
            build_weights(&[3, 2], 0),
            Err(MsnnError::InvalidTopology(_))
        ));
        assert!(matches!(
            build_weights(&[3], 1),
            Err(MsnnError::InvalidTopology(_))
        ));
        assert!(matches!(
            build_weights(&[3, 0, 1], 1),
            Err(MsnnError::InvalidTopology(_))
        ));
    }
}
