// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Collects every problem in one pass so a bad file is fixed in one edit.

use crate::{ConfigError, ConfigResult, MsnnConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    InvalidTopology { reason: String },
    InvalidValue { field: String, reason: String },
    DelayOverrunsDuration { max_output_delay: u32, duration: u32 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTopology { reason } => {
                write!(f, "Invalid network.layer_sizes: {}", reason)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::DelayOverrunsDuration {
                max_output_delay,
                duration,
            } => write!(
                f,
                "network.max_output_delay = {} exceeds simulation.duration = {}",
                max_output_delay, duration
            ),
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - At least two layers, none empty
/// - At least one synapse per connection
/// - Finite, positive refractoriness decay
/// - Non-zero duration that the maximum output delay fits in
/// - Known log level and format
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failure
pub fn validate_config(config: &MsnnConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation failure in `config`, in section order
pub fn collect_errors(config: &MsnnConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_network(config, &mut errors);
    validate_simulation(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn validate_network(config: &MsnnConfig, errors: &mut Vec<ConfigValidationError>) {
    let network = &config.network;

    if network.layer_sizes.len() < 2 {
        errors.push(ConfigValidationError::InvalidTopology {
            reason: format!("need at least 2 layers, got {}", network.layer_sizes.len()),
        });
    }
    if let Some(layer) = network.layer_sizes.iter().position(|&size| size == 0) {
        errors.push(ConfigValidationError::InvalidTopology {
            reason: format!("layer {} has no neurons", layer),
        });
    }
    if network.synapses_per_connection == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.synapses_per_connection".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if !(network.refractoriness_decay.is_finite() && network.refractoriness_decay > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.refractoriness_decay".to_string(),
            reason: format!("must be finite and > 0, got {}", network.refractoriness_decay),
        });
    }
}

fn validate_simulation(config: &MsnnConfig, errors: &mut Vec<ConfigValidationError>) {
    let simulation = &config.simulation;

    if simulation.duration == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.duration".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if config.network.max_output_delay > simulation.duration {
        errors.push(ConfigValidationError::DelayOverrunsDuration {
            max_output_delay: config.network.max_output_delay,
            duration: simulation.duration,
        });
    }
}

fn validate_logging(config: &MsnnConfig, errors: &mut Vec<ConfigValidationError>) {
    let logging = &config.logging;

    if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("expected one of {:?}, got '{}'", LOG_LEVELS, logging.level),
        });
    }
    if !LOG_FORMATS.contains(&logging.format.to_ascii_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!("expected one of {:?}, got '{}'", LOG_FORMATS, logging.format),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass() {
        assert!(collect_errors(&MsnnConfig::default()).is_empty());
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = MsnnConfig::default();
        config.network.layer_sizes = vec![3];
        config.network.synapses_per_connection = 0;
        config.network.refractoriness_decay = f64::NAN;
        config.simulation.duration = 5;
        config.logging.format = "xml".to_string();

        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ConfigValidationError::DelayOverrunsDuration {
            max_output_delay: 6,
            duration: 5
        }));

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("network.synapses_per_connection"));
        assert!(message.contains("logging.format"));
    }

    #[test]
    fn test_empty_layer_reported() {
        let mut config = MsnnConfig::default();
        config.network.layer_sizes = vec![3, 0, 1];
        assert_eq!(
            collect_errors(&config),
            vec![ConfigValidationError::InvalidTopology {
                reason: "layer 1 has no neurons".to_string()
            }]
        );
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = MsnnConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
        config.logging.level = "WARNING".to_string();
        assert!(validate_config(&config).is_err());
    }
}
