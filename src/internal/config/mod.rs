// src/internal/config/mod.rs

pub mod config;

pub use self::config::{
    get_version_info, DeploymentMode, LoggingConfig, COMBINED_LOG_FILE, DEFAULT_LOGS_DIR,
    ERROR_LOG_FILE, VERSION,
};
