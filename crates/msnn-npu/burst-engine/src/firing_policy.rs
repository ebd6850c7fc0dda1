// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-run spike cap for each neuron
//!
//! Single-spike coding is the default: once a neuron has fired it is no
//! longer evaluated for the rest of the run. The kernels themselves support
//! any number of spikes, so the cap is configurable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FiringPolicy {
    /// At most one spike per neuron per run
    #[default]
    SingleSpike,
    /// At most `n` spikes per neuron per run
    AtMost(usize),
    /// No cap; refractoriness alone limits firing
    Unlimited,
}

impl FiringPolicy {
    /// Build from a spike limit where 0 means unlimited
    ///
    /// # Example
    /// ```
    /// use msnn_npu_burst_engine::FiringPolicy;
    ///
    /// assert_eq!(FiringPolicy::from_spike_limit(0), FiringPolicy::Unlimited);
    /// assert_eq!(FiringPolicy::from_spike_limit(1), FiringPolicy::SingleSpike);
    /// assert_eq!(FiringPolicy::from_spike_limit(3), FiringPolicy::AtMost(3));
    /// ```
    pub fn from_spike_limit(limit: usize) -> Self {
        match limit {
            0 => FiringPolicy::Unlimited,
            1 => FiringPolicy::SingleSpike,
            n => FiringPolicy::AtMost(n),
        }
    }

    /// Spike cap, `None` when unlimited
    pub fn spike_limit(&self) -> Option<usize> {
        match self {
            FiringPolicy::SingleSpike => Some(1),
            FiringPolicy::AtMost(n) => Some(*n),
            FiringPolicy::Unlimited => None,
        }
    }

    /// Whether a neuron that already fired `recorded` times may be evaluated
    #[inline]
    pub fn allows(&self, recorded: usize) -> bool {
        self.spike_limit().map_or(true, |limit| recorded < limit)
    }
}
