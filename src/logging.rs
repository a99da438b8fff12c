//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format, and
//! destination come from [`LoggingConfig`]; the `CTXSTORE_LOG` environment
//! variable overrides the filter entirely.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full filter directive, e.g. `ctxstore=debug`
pub const LOG_ENV_VAR: &str = "CTXSTORE_LOG";

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const FORMATS: &[&str] = &["text", "json"];
const OUTPUTS: &[&str] = &["stderr", "stdout", "file"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when `output = "file"`. Defaults under the XDG data dir.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

// stdout carries command output
fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(format!(
                "Invalid log level: {} (must be one of {})",
                self.level,
                LEVELS.join(", ")
            ));
        }
        if !FORMATS.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            ));
        }
        if !OUTPUTS.contains(&self.output.as_str()) {
            return Err(format!(
                "Invalid log output: {} (must be 'stderr', 'stdout', or 'file')",
                self.output
            ));
        }
        for (module, level) in &self.modules {
            if !LEVELS.contains(&level.as_str()) {
                return Err(format!("Invalid log level for module {}: {}", module, level));
            }
        }
        Ok(())
    }

    /// Log file to open when `output = "file"`
    pub fn log_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(default_log_file)
    }
}

fn default_log_file() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.data_dir().join("ctxstore").join("ctxstore.log"))
}

/// Initialize the logging system.
///
/// Does nothing when logging is disabled. Fails if a global subscriber is
/// already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let config = config.cloned().unwrap_or_default();
    if !config.enabled {
        return Ok(());
    }
    config.validate().map_err(ApiError::ConfigError)?;

    let filter = build_env_filter(&config)?;
    let writer = make_writer(&config)?;
    let use_color = config.color && config.output != "file";
    let base_subscriber = Registry::default().with(filter);

    let result = if config.format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| ApiError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

/// Filter from `CTXSTORE_LOG` when set, otherwise from the config.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }
    filter_from_config(config)
}

fn filter_from_config(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }
    Ok(filter)
}

fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter, ApiError> {
    match config.output.as_str() {
        "stdout" => Ok(BoxMakeWriter::new(std::io::stdout)),
        "file" => {
            let path = config.log_file().ok_or_else(|| {
                ApiError::ConfigError("Cannot determine log file path; set logging.file".to_string())
            })?;
            let file = open_log_file(&path)?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        _ => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File, ApiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            ApiError::ConfigError(format!("Failed to open log file {}: {}", path.display(), e))
        })
}
