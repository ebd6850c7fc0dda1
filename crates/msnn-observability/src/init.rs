// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for MSNN
//!
//! Console logging is always available. With the `file-logging` feature,
//! [`init_logging`] also writes per-crate JSON logs into timestamped run folders.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Default retention: days
pub const DEFAULT_RETENTION_DAYS: u64 = 30;
/// Default retention: most recent runs
pub const DEFAULT_RETENTION_RUNS: usize = 10;

fn build_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    let level = config.tracing_level()?;
    let directives = debug_flags.to_filter_string(&level.to_string().to_ascii_lowercase());
    EnvFilter::try_new(&directives).with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install a console subscriber
///
/// Fails if the level is unknown, file output was requested (use
/// `init_logging` for that) or a global subscriber is already set.
pub fn init_console_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<()> {
    if config.writes_files() {
        return Err(anyhow!(
            "File output to {} requires init_logging (feature `file-logging`)",
            config.base_log_dir().display()
        ));
    }
    let env_filter = build_filter(config, debug_flags)?;

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_target(true)
            .json()
            .with_filter(env_filter)
            .boxed(),
    };

    Registry::default()
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install console logging: {}", e))
}

/// Keeps file writers alive; logs are flushed when dropped
#[cfg(feature = "file-logging")]
pub struct LoggingGuard {
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: PathBuf,
}

#[cfg(feature = "file-logging")]
impl LoggingGuard {
    /// The run folder logs are written to
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Initialize console output plus per-run file output
///
/// Creates a timestamped folder structure:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       ├── msnn-npu-burst-engine.log
///       ├── msnn-config.log
///       └── msnn.log (combined)
/// ```
///
/// # Arguments
/// * `config` - Level, console format and base directory
///   (`LogOutput::Directory`, default `./logs`)
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `retention_days` - Keep logs for N days (default: 30)
/// * `retention_runs` - Keep N most recent runs (default: 10)
#[cfg(feature = "file-logging")]
pub fn init_logging(
    config: &LoggingConfig,
    debug_flags: &CrateDebugFlags,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<LoggingGuard> {
    use tracing_appender::rolling;

    let base_log_dir = config.base_log_dir().to_path_buf();

    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(
        &base_log_dir,
        retention_days.unwrap_or(DEFAULT_RETENTION_DAYS),
        retention_runs.unwrap_or(DEFAULT_RETENTION_RUNS),
    )?;

    let env_filter = build_filter(config, debug_flags)?;

    let mut layers = Vec::new();
    let mut file_guards = Vec::new();

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(env_filter.clone())
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_filter(env_filter.clone())
            .boxed(),
    };
    layers.push(console_layer);

    for crate_name in crate::KNOWN_CRATES {
        let file_appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guards.push(guard);

        let crate_filter = EnvFilter::try_new(format!("{}=debug,off", crate_name.replace('-', "_")))
            .with_context(|| format!("Invalid filter for {}", crate_name))?;

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(crate_filter)
            .boxed();
        layers.push(file_layer);
    }

    let combined_appender = rolling::daily(&run_folder, "msnn.log");
    let (combined_non_blocking, combined_guard) = tracing_appender::non_blocking(combined_appender);
    file_guards.push(combined_guard);

    let combined_layer = tracing_subscriber::fmt::layer()
        .with_writer(combined_non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(env_filter)
        .boxed();
    layers.push(combined_layer);

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logging: {}", e))?;

    Ok(LoggingGuard {
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

/// Remove run folders older than `retention_days`, then trim to `retention_runs`
///
/// Folders that don't look like `run_YYYYmmdd_HHMMSS` are left alone.
/// Returns the number of folders removed.
pub fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: u64,
    retention_runs: usize,
) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(started) = started {
            runs.push((path, started));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, started)| *started);

    let expired = runs.iter().filter(|(_, started)| *started < cutoff).count();
    let over_limit = runs.len().saturating_sub(retention_runs);
    let to_remove = expired.max(over_limit);

    let mut removed = 0;
    for (path, _) in runs.iter().take(to_remove) {
        match std::fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!(
                "Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    Ok(removed)
}
