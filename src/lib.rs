// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # MSNN - Multi-Synapse Spiking Neural Network
//!
//! Feed-forward spiking networks built on the Spike Response Model, where
//! every connected neuron pair is joined by several synapses with staggered
//! delays. This crate re-exports the workspace members behind feature flags
//! and wires configuration, logging and simulation together.
//!
//! ## Feature Flags
//! - **`burst-engine`** (default): tick-ordered simulation
//! - **`observability`** (default): console logging setup
//! - **`file-logging`**: per-run log folders with retention
//!
//! ## Usage
//!
//! ```rust,no_run
//! use msnn::prelude::*;
//!
//! let config = msnn::load_validated_config(None)?;
//! let network = msnn::network_from_config(&config)?;
//! let outputs = network.simulate(
//!     config.simulation.duration,
//!     config.network.max_output_delay,
//!     &[vec![0.0], vec![0.0], vec![]],
//! )?;
//! println!("output spikes: {:?}", outputs[0].as_slice());
//! # Ok::<(), msnn::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: msnn-npu-neural, msnn-config               │
//! │  (Topology, weights, delays, kernels, TOML config)      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: msnn-npu-burst-engine                      │
//! │  (Tick loop, firing policy, parallel layer evaluation)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: msnn-observability                     │
//! │  (Console and file logging, per-crate debug flags)      │
//! └─────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::Path;

// Re-export foundation
pub use msnn_config as config;
pub use msnn_npu_neural as neural;

// Re-export algorithms
#[cfg(feature = "burst-engine")]
pub use msnn_npu_burst_engine as burst_engine;

// Re-export infrastructure
#[cfg(feature = "observability")]
pub use msnn_observability as observability;

/// Errors raised while wiring configuration, logging and simulation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] msnn_config::ConfigError),

    #[error(transparent)]
    Network(#[from] msnn_npu_neural::MsnnError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use msnn_config::{MsnnConfig, NetworkConfig, SimulationConfig};
    pub use msnn_npu_neural::{
        squared_error_loss, MsnnError, NetworkTopology, NeuronModel, SRMModel, SRMParameters,
        SpikeTrain, WeightTensor,
    };

    #[cfg(feature = "burst-engine")]
    pub use msnn_npu_burst_engine::{
        FiringPolicy, MultiSpikingNetwork, SimulationOptions, SimulationOutput, SimulationStats,
    };
}

/// Load configuration (file, environment, CLI overrides) and validate it
pub fn load_validated_config(
    cli_args: Option<&HashMap<String, String>>,
) -> Result<msnn_config::MsnnConfig> {
    load_validated_config_from(None, cli_args)
}

/// Like [`load_validated_config`] but reads an explicit file
pub fn load_validated_config_from(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> Result<msnn_config::MsnnConfig> {
    let config = msnn_config::load_config(config_path, cli_args)?;
    msnn_config::validate_config(&config)?;
    Ok(config)
}

/// Build a network, with simulation options taken from `[simulation]`
#[cfg(feature = "burst-engine")]
pub fn network_from_config(
    config: &msnn_config::MsnnConfig,
) -> Result<msnn_npu_burst_engine::MultiSpikingNetwork> {
    Ok(msnn_npu_burst_engine::MultiSpikingNetwork::from_config(
        &config.network,
        &config.simulation,
    )?)
}

/// Run one simulation using the configured duration and maximum output delay
#[cfg(feature = "burst-engine")]
pub fn run_configured<I: AsRef<[f64]>>(
    config: &msnn_config::MsnnConfig,
    inputs: &[I],
) -> Result<msnn_npu_burst_engine::SimulationOutput> {
    let network = network_from_config(config)?;
    Ok(network.run(
        config.simulation.duration,
        config.network.max_output_delay,
        inputs,
    )?)
}

/// Map the `[logging]` section onto observability settings
///
/// `debug_crates` from the file are merged with `--debug-*` arguments and
/// `MSNN_DEBUG`.
#[cfg(feature = "observability")]
pub fn logging_settings(
    logging: &msnn_config::LoggingConfig,
) -> Result<(
    msnn_observability::LoggingConfig,
    msnn_observability::CrateDebugFlags,
)> {
    let format = logging
        .format
        .parse::<msnn_observability::LogFormat>()
        .map_err(|e| Error::Logging(e.to_string()))?;
    let settings = msnn_observability::LoggingConfig {
        level: logging.level.clone(),
        format,
        ..Default::default()
    };

    let mut flags = msnn_observability::parse_debug_flags();
    for crate_name in &logging.debug_crates {
        flags.enable(crate_name);
    }
    Ok((settings, flags))
}

/// Install console logging from the `[logging]` section
#[cfg(feature = "observability")]
pub fn init_logging_from_config(logging: &msnn_config::LoggingConfig) -> Result<()> {
    let (settings, flags) = logging_settings(logging)?;
    msnn_observability::init_console_logging(&settings, &flags)
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Install console and file logging from the `[logging]` section
///
/// Run folders go below `log_dir`, or `./logs` when `None`.
/// Keep the returned guard alive for as long as logs should be written.
#[cfg(feature = "file-logging")]
pub fn init_file_logging_from_config(
    logging: &msnn_config::LoggingConfig,
    log_dir: Option<std::path::PathBuf>,
) -> Result<msnn_observability::LoggingGuard> {
    let (mut settings, flags) = logging_settings(logging)?;
    if let Some(dir) = log_dir {
        settings.output = msnn_observability::LogOutput::Directory(dir);
    }
    msnn_observability::init_logging(&settings, &flags, None, None)
        .map_err(|e| Error::Logging(e.to_string()))
}
