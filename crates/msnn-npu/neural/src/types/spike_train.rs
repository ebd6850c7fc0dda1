// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-neuron spike history
//!
//! A spike train only ever grows at its end, and its times never go
//! backwards. Resetting between runs is done by building a fresh train.

use super::error::{MsnnError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time-ascending spike times of one neuron
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct SpikeTrain {
    times: Vec<f64>,
}

impl SpikeTrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spike at `time`
    ///
    /// # Errors
    /// `MsnnError::InvalidParameter` if `time` is not finite or is earlier
    /// than the last recorded spike.
    pub fn record(&mut self, time: f64) -> Result<()> {
        if !time.is_finite() {
            return Err(MsnnError::InvalidParameter(format!(
                "spike time must be finite, got {}",
                time
            )));
        }
        if let Some(last) = self.last() {
            if time < last {
                return Err(MsnnError::InvalidParameter(format!(
                    "spike time {} precedes last spike {}",
                    time, last
                )));
            }
        }
        self.times.push(time);
        Ok(())
    }

    /// Most recent spike, `None` if the neuron never fired
    #[inline]
    pub fn last(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Earliest spike, `None` if the neuron never fired
    #[inline]
    pub fn first(&self) -> Option<f64> {
        self.times.first().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}

impl TryFrom<Vec<f64>> for SpikeTrain {
    type Error = MsnnError;

    fn try_from(times: Vec<f64>) -> Result<Self> {
        let mut train = SpikeTrain {
            times: Vec::with_capacity(times.len()),
        };
        for time in times {
            train.record(time)?;
        }
        Ok(train)
    }
}

impl From<SpikeTrain> for Vec<f64> {
    fn from(train: SpikeTrain) -> Self {
        train.times
    }
}
