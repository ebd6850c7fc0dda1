// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for network construction, simulation and loss evaluation
//!
//! Every variant is a precondition failure: it is detected before any state
//! is created or mutated and is never worth retrying with the same input.

/// Error types for MSNN operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MsnnError {
    /// Fewer than two layers, an empty layer, or zero synapses per connection
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Input count mismatch: expected {expected} spike trains, got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    #[error(
        "Maximum output delay {max_output_delay} overruns simulation duration {duration}"
    )]
    DelayOverrunsSimulation { max_output_delay: u32, duration: u32 },

    #[error("Length mismatch: observed has {observed} values, expected has {expected}")]
    LengthMismatch { observed: usize, expected: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "Weight index out of bounds: layer {layer}, destination {destination}, source {source_neuron}, synapse {synapse}"
    )]
    IndexOutOfBounds {
        layer: usize,
        destination: usize,
        source_neuron: usize,
        synapse: usize,
    },
}

pub type Result<T> = core::result::Result<T, MsnnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = MsnnError::IndexOutOfBounds {
            layer: 2,
            destination: 0,
            source_neuron: 4,
            synapse: 1,
        };
        assert_eq!(
            err.to_string(),
            "Weight index out of bounds: layer 2, destination 0, source 4, synapse 1"
        );
        assert!(std::error::Error::source(&err).is_none());
    }
}
