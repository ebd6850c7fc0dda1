// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, MsnnConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the MSNN configuration file
///
/// Search order:
/// 1. `MSNN_CONFIG_PATH` environment variable
/// 2. Current working directory: `./msnn_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("MSNN_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by MSNN_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        for ancestor in cwd.ancestors().skip(1).take(5) {
            search_paths.push(ancestor.join(CONFIG_FILE_NAME));
        }
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "MSNN configuration file '{}' not found in any of these locations:\n{}\n\nSet MSNN_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Validation is left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<MsnnConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: MsnnConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `MSNN_LAYER_SIZES` -> `network.layer_sizes` (comma-separated)
/// - `MSNN_SYNAPSES_PER_CONNECTION` -> `network.synapses_per_connection`
/// - `MSNN_MAX_OUTPUT_DELAY` -> `network.max_output_delay`
/// - `MSNN_REFRACTORINESS_DECAY` -> `network.refractoriness_decay`
/// - `MSNN_SIMULATION_DURATION` -> `simulation.duration`
/// - `MSNN_MAX_SPIKES_PER_NEURON` -> `simulation.max_spikes_per_neuron`
/// - `MSNN_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut MsnnConfig) {
    let overrides: HashMap<String, String> = [
        ("MSNN_LAYER_SIZES", "network.layer_sizes"),
        ("MSNN_SYNAPSES_PER_CONNECTION", "network.synapses_per_connection"),
        ("MSNN_MAX_OUTPUT_DELAY", "network.max_output_delay"),
        ("MSNN_REFRACTORINESS_DECAY", "network.refractoriness_decay"),
        ("MSNN_SIMULATION_DURATION", "simulation.duration"),
        ("MSNN_MAX_SPIKES_PER_NEURON", "simulation.max_spikes_per_neuron"),
        ("MSNN_LOG_LEVEL", "logging.level"),
    ]
    .into_iter()
    .filter_map(|(var, key)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_cli_overrides(config, &overrides);
}

/// Apply CLI argument overrides to configuration
///
/// Keys use dotted section paths, e.g. `network.max_output_delay`.
/// Unknown keys and unparseable values are ignored.
pub fn apply_cli_overrides(config: &mut MsnnConfig, args: &HashMap<String, String>) {
    for (key, value) in args {
        let value = value.trim();
        match key.as_str() {
            "network.layer_sizes" => {
                if let Some(sizes) = parse_layer_sizes(value) {
                    config.network.layer_sizes = sizes;
                }
            }
            "network.synapses_per_connection" => {
                if let Ok(count) = value.parse() {
                    config.network.synapses_per_connection = count;
                }
            }
            "network.max_output_delay" => {
                if let Ok(delay) = value.parse() {
                    config.network.max_output_delay = delay;
                }
            }
            "network.refractoriness_decay" => {
                if let Ok(decay) = value.parse() {
                    config.network.refractoriness_decay = decay;
                }
            }
            "simulation.duration" => {
                if let Ok(duration) = value.parse() {
                    config.simulation.duration = duration;
                }
            }
            "simulation.max_spikes_per_neuron" => {
                if let Ok(limit) = value.parse() {
                    config.simulation.max_spikes_per_neuron = limit;
                }
            }
            "simulation.parallel_neuron_threshold" => {
                if let Ok(threshold) = value.parse() {
                    config.simulation.parallel_neuron_threshold = threshold;
                }
            }
            "logging.level" => config.logging.level = value.to_string(),
            "logging.format" => config.logging.format = value.to_string(),
            "logging.debug_crates" => {
                config.logging.debug_crates = value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {}
        }
    }
}

/// Parse `"3, 5, 1"` or `"[3,5,1]"` into layer sizes
fn parse_layer_sizes(value: &str) -> Option<Vec<usize>> {
    value
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect()
}
