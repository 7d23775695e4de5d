// src/internal/logger/logger.rs

use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::facility::{LogFacility, Logger};
use super::layer::FacilityLayer;
use super::LogError;
use crate::internal::config::LoggingConfig;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Initialize the process-wide logger with the given configuration
pub fn init_logger(cfg: &LoggingConfig) -> Result<Logger, LogError> {
    if GLOBAL.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    install(Logger::new(LogFacility::from_config(cfg)?))
}

/// Make `logger` the process-wide default and route `tracing` events into it.
/// The default is only recorded once the subscriber has been installed.
pub fn install(logger: Logger) -> Result<Logger, LogError> {
    if GLOBAL.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let filter = EnvFilter::new(logger.level().as_str());

    tracing_subscriber::registry()
        .with(filter)
        .with(FacilityLayer::new(logger.clone()))
        .try_init()
        .map_err(|e| LogError::Subscriber(e.to_string()))?;

    GLOBAL
        .set(logger.clone())
        .map_err(|_| LogError::AlreadyInitialized)?;

    Ok(logger)
}

/// The process-wide logger, if one has been installed
pub fn global() -> Option<Logger> {
    GLOBAL.get().cloned()
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)*) => {{
        let fields = $crate::internal::logger::Fields::new() $(.with($key, $value))*;
        $logger.emit($level, &$msg, Some(&fields))
    }};
}

// Convenience logging macros: `log_info!(logger, "message", "key" => value, ...)`
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::internal::logger::Level::Debug, $msg $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::internal::logger::Level::Info, $msg $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::internal::logger::Level::Warn, $msg $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::internal::logger::Level::Error, $msg $(, $key => $value)*)
    };
}
