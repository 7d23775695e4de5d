pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::config::LoggingConfig;
pub use internal::logger::{
    global, init_logger, FieldValue, Fields, Level, LogError, LogFacility, Logger, Sink,
};
