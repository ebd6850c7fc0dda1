// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Squared-error loss for an external trainer

use crate::types::{MsnnError, Result};

/// `½ · Σ (observed_i - expected_i)²`
///
/// # Errors
/// `MsnnError::LengthMismatch` if the slices differ in length.
///
/// # Example
/// ```
/// use msnn_npu_neural::squared_error_loss;
///
/// assert_eq!(squared_error_loss(&[1.0], &[0.0]).unwrap(), 0.5);
/// assert_eq!(squared_error_loss(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
/// assert!(squared_error_loss(&[1.0], &[]).is_err());
/// ```
pub fn squared_error_loss(observed: &[f64], expected: &[f64]) -> Result<f64> {
    if observed.len() != expected.len() {
        return Err(MsnnError::LengthMismatch {
            observed: observed.len(),
            expected: expected.len(),
        });
    }

    let sum: f64 = observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e) * (o - e))
        .sum();
    Ok(0.5 * sum)
}
