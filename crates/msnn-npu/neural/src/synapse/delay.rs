// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse delay schedule
//!
//! Maps a synapse index to its transmission delay. The schedule is shared by
//! every connection in the network.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-synapse-index transmission delays, in whole time units
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DelaySchedule {
    delays: Vec<u32>,
}

impl DelaySchedule {
    /// Delay of synapse `synapse`, `None` past the last synapse
    #[inline]
    pub fn get(&self, synapse: usize) -> Option<u32> {
        self.delays.get(synapse).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.delays
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Longest delay in the schedule
    pub fn max_delay(&self) -> u32 {
        self.delays.last().copied().unwrap_or(0)
    }
}

/// Compute the delay schedule for `synapse_count` synapses
///
/// The first synapse has delay 1; each following synapse adds
/// `floor(max_output_delay / synapse_count)`.
///
/// Returns an empty schedule for `synapse_count == 0`; network construction
/// rejects that case before getting here.
///
/// # Example
/// ```
/// use msnn_npu_neural::synapse::compute_delays;
///
/// assert_eq!(compute_delays(4, 6).as_slice(), &[1, 2, 3, 4]);
/// assert_eq!(compute_delays(3, 9).as_slice(), &[1, 4, 7]);
/// assert_eq!(compute_delays(4, 0).as_slice(), &[1, 1, 1, 1]);
/// ```
pub fn compute_delays(synapse_count: usize, max_output_delay: u32) -> DelaySchedule {
    if synapse_count == 0 {
        return DelaySchedule { delays: Vec::new() };
    }

    let increment = (max_output_delay as usize / synapse_count) as u32;
    let mut delays = Vec::with_capacity(synapse_count);
    delays.push(1u32);
    for i in 1..synapse_count {
        delays.push(delays[i - 1] + increment);
    }
    DelaySchedule { delays }
}
