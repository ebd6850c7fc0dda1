// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Spike response kernels
//!
//! Pure functions of elapsed time. Both kernels are exactly zero for
//! `t <= 0`, so a spike that has not yet arrived (or a neuron that never
//! fired) contributes nothing.
//!
//! ```text
//! ε(t) = (t/τ) · e^(1 - t/τ)        t > 0
//! η(t) = -2ϑ · e^(-t/τr)            t > 0
//! ```

use crate::NEURON_THRESHOLD;

/// Post-synaptic potential kernel ε
///
/// Rises from 0, peaks at exactly 1.0 when `time == time_decay`, then decays.
///
/// # Example
/// ```
/// use msnn_npu_neural::post_synaptic_potential;
///
/// assert_eq!(post_synaptic_potential(0.0, 7.0), 0.0);
/// assert_eq!(post_synaptic_potential(-3.0, 7.0), 0.0);
/// assert!((post_synaptic_potential(7.0, 7.0) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn post_synaptic_potential(time: f64, time_decay: f64) -> f64 {
    if time > 0.0 {
        let scaled = time / time_decay;
        scaled * (1.0 - scaled).exp()
    } else {
        0.0
    }
}

/// Refractoriness kernel η
///
/// Negative for `time > 0`, starting at `-2 × threshold` and decaying
/// toward zero.
///
/// # Example
/// ```
/// use msnn_npu_neural::refractoriness;
///
/// assert_eq!(refractoriness(0.0, 80.0), 0.0);
/// assert!(refractoriness(1.0, 80.0) < refractoriness(2.0, 80.0));
/// assert!(refractoriness(1.0, 80.0) < 0.0);
/// ```
#[inline]
pub fn refractoriness(time: f64, refractoriness_decay: f64) -> f64 {
    if time > 0.0 {
        -2.0 * NEURON_THRESHOLD * (-time / refractoriness_decay).exp()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psp_peaks_at_time_decay() {
        for tau in [0.5, 1.0, 7.0, 42.0, 1000.0] {
            assert!((post_synaptic_potential(tau, tau) - 1.0).abs() < 1e-12);
            assert!(post_synaptic_potential(tau * 0.5, tau) < 1.0);
            assert!(post_synaptic_potential(tau * 1.5, tau) < 1.0);
        }
    }

    #[test]
    fn test_psp_zero_before_arrival() {
        assert_eq!(post_synaptic_potential(0.0, 7.0), 0.0);
        assert_eq!(post_synaptic_potential(-0.001, 7.0), 0.0);
        assert_eq!(post_synaptic_potential(f64::NEG_INFINITY, 7.0), 0.0);
    }

    #[test]
    fn test_psp_known_value() {
        // (1/7) · e^(6/7)
        let expected = (1.0 / 7.0) * (6.0f64 / 7.0).exp();
        assert!((post_synaptic_potential(1.0, 7.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_psp_underflows_to_zero() {
        let value = post_synaptic_potential(1.0e6, 1.0);
        assert!(value.is_finite());
        assert!(value >= 0.0 && value < 1e-300);
    }

    #[test]
    fn test_refractoriness_increases_toward_zero() {
        let mut previous = refractoriness(0.5, 80.0);
        assert!((refractoriness(1e-12, 80.0) + 2.0 * NEURON_THRESHOLD).abs() < 1e-9);
        for step in 1..200 {
            let current = refractoriness(0.5 + step as f64, 80.0);
            assert!(current > previous);
            assert!(current < 0.0);
            previous = current;
        }
    }

    #[test]
    fn test_refractoriness_zero_without_prior_spike() {
        assert_eq!(refractoriness(0.0, 80.0), 0.0);
        assert_eq!(refractoriness(-5.0, 80.0), 0.0);
        assert_eq!(refractoriness(f64::NEG_INFINITY, 80.0), 0.0);
    }

    #[test]
    fn test_refractoriness_large_time() {
        let value = refractoriness(1.0e9, 1.0);
        assert!(value <= 0.0 && value > -1e-300);
    }
}
