// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions

pub mod error;
pub mod spike_train;
pub mod topology;

pub use error::{MsnnError, Result};
pub use spike_train::SpikeTrain;
pub use topology::NetworkTopology;
