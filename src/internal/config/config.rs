use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::internal::logger::Level;

// Version information from build script - using option_env! for safety
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_LOGS_DIR: &str = "logs";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const COMBINED_LOG_FILE: &str = "combined.log";

/// Get version information
pub fn get_version_info() -> String {
    let build_timestamp = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown");
    let build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let rustc_semver = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");
    let cargo_target_triple = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");

    format!(
        "sinklog version {}\n\
         Built: {} ({})\n\
         Rust: {}\n\
         Target: {}",
        VERSION, build_date, build_timestamp, rustc_semver, cargo_target_triple
    )
}

/// DeploymentMode decides whether file sinks are attached
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    Production,
    #[default]
    Development,
    /// Any other value, kept verbatim
    Other(String),
}

impl DeploymentMode {
    /// Only the exact string `production` selects production mode
    pub fn from_env_value(value: &str) -> Self {
        match value {
            "production" => DeploymentMode::Production,
            "development" | "" => DeploymentMode::Development,
            other => DeploymentMode::Other(other.to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        *self == DeploymentMode::Production
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Production => f.write_str("production"),
            DeploymentMode::Development => f.write_str("development"),
            DeploymentMode::Other(s) => f.write_str(s),
        }
    }
}

impl Serialize for DeploymentMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Settings as read from files and the environment, before interpretation
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    node_env: String,
    #[serde(default = "default_logs_dir")]
    logs_dir: String,
    #[serde(default = "default_true")]
    log_color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_logs_dir() -> String {
    DEFAULT_LOGS_DIR.to_string()
}
fn default_true() -> bool {
    true
}

/// LoggingConfig is read once at startup and never consulted from the environment again
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: Level,
    pub mode: DeploymentMode,
    pub logs_dir: PathBuf,
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            mode: DeploymentMode::Development,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Load from the process environment (`LOG_LEVEL`, `NODE_ENV`, `LOGS_DIR`, `LOG_COLOR`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None, Environment::default())
    }

    /// Load from an optional config file, then the given environment map
    pub fn load_from(
        file: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let source: config::Map<String, String> = env.into_iter().collect();
        Self::build(file, Environment::default().source(Some(source)))
    }

    /// Load from an optional config file, then the process environment
    pub fn load_with_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(file, Environment::default())
    }

    fn build(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Start with default values
            .set_default("log_level", "info")?
            .set_default("node_env", "development")?
            .set_default("logs_dir", DEFAULT_LOGS_DIR)?
            .set_default("log_color", true)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        // Environment variables take precedence over the file
        let raw: RawSettings = builder.add_source(env).build()?.try_deserialize()?;

        Ok(Self {
            level: Level::parse_lenient(&raw.log_level),
            mode: DeploymentMode::from_env_value(&raw.node_env),
            logs_dir: PathBuf::from(raw.logs_dir),
            color: raw.log_color,
        })
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.logs_dir.join(ERROR_LOG_FILE)
    }

    pub fn combined_log_path(&self) -> PathBuf {
        self.logs_dir.join(COMBINED_LOG_FILE)
    }
}
