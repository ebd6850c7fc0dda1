// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network topology: one neuron count per layer
//!
//! Layers are numbered forwards and zero-based. Layer 0 is the input layer,
//! the last layer is the output layer.

use super::error::{MsnnError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered, immutable layer sizes of a feed-forward network
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkTopology {
    layer_sizes: Vec<usize>,
}

impl NetworkTopology {
    /// Validate and wrap a layer-size sequence
    ///
    /// # Errors
    /// `MsnnError::InvalidTopology` if there are fewer than two layers or any
    /// layer is empty.
    ///
    /// # Example
    /// ```
    /// use msnn_npu_neural::NetworkTopology;
    ///
    /// let topology = NetworkTopology::new(vec![3, 5, 1]).unwrap();
    /// assert_eq!(topology.input_size(), 3);
    /// assert_eq!(topology.output_size(), 1);
    /// assert!(NetworkTopology::new(vec![3]).is_err());
    /// ```
    pub fn new(layer_sizes: Vec<usize>) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(MsnnError::InvalidTopology(format!(
                "need at least 2 layers, got {}",
                layer_sizes.len()
            )));
        }
        if let Some(layer) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(MsnnError::InvalidTopology(format!(
                "layer {} has no neurons",
                layer
            )));
        }
        Ok(Self { layer_sizes })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    /// Neuron count of `layer`, `None` past the output layer
    pub fn layer_size(&self, layer: usize) -> Option<usize> {
        self.layer_sizes.get(layer).copied()
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn output_layer(&self) -> usize {
        self.layer_sizes.len() - 1
    }

    /// Total neurons across all layers, inputs included
    pub fn neuron_count(&self) -> usize {
        self.layer_sizes.iter().sum()
    }
}

impl TryFrom<Vec<usize>> for NetworkTopology {
    type Error = MsnnError;

    fn try_from(layer_sizes: Vec<usize>) -> Result<Self> {
        Self::new(layer_sizes)
    }
}
