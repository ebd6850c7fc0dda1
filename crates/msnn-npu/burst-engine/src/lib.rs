// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # MSNN Burst Engine
//!
//! Discrete-time forward simulation of a feed-forward multi-synapse SRM
//! network.
//!
//! ## Loop Structure
//! - one tick per whole time unit, `0..duration`
//! - layers visited in increasing order from layer 1
//! - every neuron of a layer evaluated against spikes already recorded,
//!   then all threshold crossings of that layer published at once
//!
//! ## Architecture
//! - Weights and delay schedule are owned by [`MultiSpikingNetwork`] and are
//!   read-only during a run
//! - Spike history lives in a per-run [`SimulationState`]
//! - Rayon for wide layers; results are identical to sequential evaluation

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod firing_policy;
pub mod network;
pub mod simulation;
pub mod simulation_state;

pub use firing_policy::FiringPolicy;
pub use network::MultiSpikingNetwork;
pub use simulation::{run_simulation, SimulationOptions, SimulationOutput};
pub use simulation_state::SimulationState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-run engine statistics
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationStats {
    pub ticks: u32,
    pub neuron_evaluations: u64,
    /// Spikes emitted per layer; the input layer entry counts the supplied spikes
    pub spikes_per_layer: Vec<usize>,
    pub processing_time_us: u64,
}

impl SimulationStats {
    /// Spikes produced by the engine, input spikes excluded
    pub fn total_emitted_spikes(&self) -> usize {
        self.spikes_per_layer.iter().skip(1).sum()
    }

    /// Get average neuron evaluations per tick
    pub fn avg_evaluations_per_tick(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.neuron_evaluations as f64 / self.ticks as f64
        }
    }
}
