// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Multi-Synapse SRM Neural Computation
//!
//! Everything a single feed-forward Spike Response Model network needs,
//! independent of how the simulation is driven:
//! - **Types**: errors, topology, spike trains
//! - **Synapse**: weight tensor and per-synapse delay schedule
//! - **Kernels**: post-synaptic potential and refractoriness
//! - **Models**: the SRM neuron model and its parameters
//! - **Dynamics**: membrane potential evaluation
//! - **Loss**: squared error over output vectors

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Firing threshold shared by every neuron in the network
pub const NEURON_THRESHOLD: f64 = 1.0;

/// Value every synaptic weight starts at when a network is built
pub const INITIAL_WEIGHT: f64 = 1.0;

pub mod types;

pub mod dynamics;
pub mod kernels;
pub mod loss;

pub mod synapse;

pub mod models;

pub use dynamics::*;
pub use kernels::*;
pub use loss::*;

pub use types::{MsnnError, NetworkTopology, Result, SpikeTrain};

pub use synapse::{compute_delays, DelaySchedule, WeightTensor};

pub use models::{ModelParameters, NeuronModel, SRMModel, SRMParameters};
