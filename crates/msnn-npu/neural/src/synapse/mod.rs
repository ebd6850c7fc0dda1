// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Synaptic structure module
//!
//! Every connected pair of neurons is joined by the same number of parallel
//! synapses. Each synapse has its own weight and a delay that depends only
//! on its index within the connection.

pub mod delay;
pub mod weight;

pub use delay::*;
pub use weight::*;
