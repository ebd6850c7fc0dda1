// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base folder for run logs when no directory is configured
pub const DEFAULT_LOG_DIR: &str = "./logs";
use std::str::FromStr;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text or json)
    pub format: LogFormat,

    /// Console only, or console plus per-run files below a directory
    pub output: LogOutput,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    Stdout,
    /// Per-run folders below this directory
    Directory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogSettingError {
    #[error("unknown log format '{0}' (expected text or json)")]
    UnknownFormat(String),

    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}

impl FromStr for LogFormat {
    type Err = LogSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogSettingError::UnknownFormat(s.to_string())),
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`
    pub fn tracing_level(&self) -> Result<tracing::Level, LogSettingError> {
        tracing::Level::from_str(&self.level)
            .map_err(|_| LogSettingError::UnknownLevel(self.level.clone()))
    }
}

impl LoggingConfig {
    /// Directory run folders are created in
    ///
    /// Falls back to [`DEFAULT_LOG_DIR`] for `LogOutput::Stdout`.
    pub fn base_log_dir(&self) -> &Path {
        match &self.output {
            LogOutput::Directory(dir) => dir,
            LogOutput::Stdout => Path::new(DEFAULT_LOG_DIR),
        }
    }

    /// Whether file output was requested
    pub fn writes_files(&self) -> bool {
        matches!(self.output, LogOutput::Directory(_))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
            output: LogOutput::Stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(LogSettingError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_base_log_dir() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.base_log_dir(), Path::new(DEFAULT_LOG_DIR));
        assert!(!config.writes_files());

        config.output = LogOutput::Directory(PathBuf::from("/tmp/msnn-runs"));
        assert_eq!(config.base_log_dir(), Path::new("/tmp/msnn-runs"));
        assert!(config.writes_files());
    }

    #[test]
    fn test_level_parsing() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.tracing_level(), Ok(tracing::Level::INFO));
        config.level = "loud".to_string();
        assert!(config.tracing_level().is_err());
    }
}
