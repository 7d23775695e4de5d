// src/internal/logger/mod.rs

pub mod facility;
pub mod format;
pub mod layer;
pub mod logger;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod record;
pub mod sink;

use std::path::PathBuf;

// Re-export main types
pub use facility::{LogFacility, Logger};
pub use format::Format;
pub use layer::FacilityLayer;
pub use logger::{global, init_logger, install};
pub use record::{FieldValue, Fields, Level, LogRecord};
pub use sink::{Destination, Sink};

// Note: The log_* macros are exported at the crate root via #[macro_export]
// They can be accessed as sinklog::log_info!(logger, "message", "key" => value)

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),
    #[error("invalid field (expected key=value): {0:?}")]
    InvalidField(String),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to open log file {}: {source}", path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}
