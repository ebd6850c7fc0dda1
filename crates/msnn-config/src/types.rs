// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `msnn_configuration.toml`. Missing
//! sections and keys fall back to the reference network.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MsnnConfig {
    pub network: NetworkConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Network construction parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Neurons per layer, input layer first
    pub layer_sizes: Vec<usize>,
    pub synapses_per_connection: usize,
    /// Latest expected output time; sets the delay schedule and τ
    pub max_output_delay: u32,
    pub refractoriness_decay: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            // 2 inputs + 1 bias, 5 hidden, 1 output
            layer_sizes: vec![3, 5, 1],
            synapses_per_connection: 4,
            max_output_delay: 6,
            refractoriness_decay: 80.0,
        }
    }
}

/// Simulation run parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks per run
    pub duration: u32,
    /// Spike cap per neuron per run (0 = unlimited)
    pub max_spikes_per_neuron: usize,
    /// Layers at least this wide are evaluated in parallel
    pub parallel_neuron_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 40,
            max_spikes_per_neuron: 1,
            parallel_neuron_threshold: 64,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// text or json
    pub format: String,
    /// Crates to log at debug level regardless of `level`
    pub debug_crates: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            debug_crates: Vec::new(),
        }
    }
}
