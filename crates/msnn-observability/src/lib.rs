// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # msnn-observability
//!
//! Logging setup shared by the MSNN crates, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: per-run log folders with daily rotation and retention

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known MSNN crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "msnn",
    "msnn-config",
    "msnn-npu-neural",
    "msnn-npu-burst-engine",
    "msnn-observability",
];
