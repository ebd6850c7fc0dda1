// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # SRM (Spike Response Model) Neuron
//!
//! ## Model Dynamics
//!
//! ```text
//! Membrane potential of neuron j at time t:
//!     x_j(t) = Σ_i Σ_k Σ_g  w_ij^k · ε(t - t_i^(g) - d^k)  +  η(t - t_j^(f))
//!
//!     Where:
//!     - i = source neuron in the previous layer
//!     - k = synapse index, with delay d^k
//!     - g = every recorded spike of neuron i
//!     - t_j^(f) = last spike of neuron j
//!
//! Firing Check:
//!     x_j(t) ≥ ϑ  →  FIRE (spike recorded at t)
//! ```

use super::traits::{ModelParameters, NeuronModel};
use crate::kernels;
use crate::NEURON_THRESHOLD;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spike Response Model with the α-shaped PSP and exponential refractoriness
#[derive(Debug, Clone, Copy, Default)]
pub struct SRMModel;

impl SRMModel {
    pub fn new() -> Self {
        Self
    }
}

impl NeuronModel for SRMModel {
    type Parameters = SRMParameters;

    fn model_name(&self) -> &'static str {
        "Spike Response Model (SRM)"
    }

    #[inline(always)]
    fn post_synaptic_potential(&self, time: f64, params: &SRMParameters) -> f64 {
        kernels::post_synaptic_potential(time, params.time_decay)
    }

    #[inline(always)]
    fn refractoriness(&self, time: f64, params: &SRMParameters) -> f64 {
        kernels::refractoriness(time, params.refractoriness_decay)
    }

    #[inline(always)]
    fn should_fire(&self, membrane_potential: f64, params: &SRMParameters) -> bool {
        membrane_potential >= params.threshold
    }
}

/// SRM parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SRMParameters {
    /// τ: PSP time constant, also the time of the PSP peak
    pub time_decay: f64,

    /// τr: refractoriness time constant
    pub refractoriness_decay: f64,

    /// ϑ: firing threshold
    pub threshold: f64,
}

impl SRMParameters {
    /// Parameters for a network whose outputs may arrive up to
    /// `max_output_delay` after the inputs
    ///
    /// τ is one more than the maximum output delay.
    pub fn for_output_delay(max_output_delay: u32, refractoriness_decay: f64) -> Self {
        Self {
            time_decay: max_output_delay as f64 + 1.0,
            refractoriness_decay,
            threshold: NEURON_THRESHOLD,
        }
    }
}

impl ModelParameters for SRMParameters {
    fn validate(&self) -> Result<(), &'static str> {
        if !(self.time_decay.is_finite() && self.time_decay > 0.0) {
            return Err("SRM: time decay must be finite and > 0");
        }
        if !(self.refractoriness_decay.is_finite() && self.refractoriness_decay > 0.0) {
            return Err("SRM: refractoriness decay must be finite and > 0");
        }
        if !self.threshold.is_finite() {
            return Err("SRM: threshold must be finite");
        }
        Ok(())
    }

    fn parameter_count() -> usize {
        3 // time_decay + refractoriness_decay + threshold
    }
}
