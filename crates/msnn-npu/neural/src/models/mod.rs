// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuron Model Architecture
//!
//! A neuron model supplies the two response kernels and the firing rule.
//! The membrane potential evaluator is generic over [`NeuronModel`], so a
//! different kernel shape only needs a new implementation of the trait.
//!
//! ## Adding a New Neuron Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement `NeuronModel` trait
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod srm;
pub mod traits;

pub use srm::{SRMModel, SRMParameters};
pub use traits::{ModelParameters, NeuronModel};
