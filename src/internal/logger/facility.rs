// src/internal/logger/facility.rs

use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use super::record::{Fields, Level, LogRecord};
use super::sink::Sink;
use super::LogError;
use crate::internal::config::LoggingConfig;

/// A global threshold plus an ordered set of sinks, immutable once built
#[derive(Debug, Clone)]
pub struct LogFacility {
    level: Level,
    sinks: Vec<Sink>,
}

impl LogFacility {
    /// Facility with no sinks; add them with [`LogFacility::with_sink`]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Console sink always; `error.log` and `combined.log` in production
    pub fn from_config(cfg: &LoggingConfig) -> Result<Self, LogError> {
        let mut facility = Self::new(cfg.level).with_sink(Sink::console(cfg.level, cfg.color));

        if cfg.mode.is_production() {
            facility = facility
                .with_sink(Sink::file(cfg.error_log_path(), Level::Error)?)
                .with_sink(Sink::file(cfg.combined_log_path(), cfg.level)?);
        }

        debug!(
            "Built log facility: level={}, mode={}, sinks={}",
            cfg.level,
            cfg.mode,
            facility.sinks.len()
        );
        Ok(facility)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    /// Whether a record at `level` passes the global threshold
    pub fn enabled(&self, level: Level) -> bool {
        level.clears(self.level)
    }

    /// Offer a record to every sink if it clears the global threshold.
    /// Never fails; sink errors are reported on stderr.
    pub fn emit(&self, level: Level, message: &str, fields: Option<&Fields>) {
        if !self.enabled(level) {
            return;
        }
        let record = LogRecord::new(level, message, fields.cloned().unwrap_or_default());
        self.dispatch(&record);
    }

    /// Offer an already-built record, applying the same global filter
    pub fn emit_record(&self, record: &LogRecord) {
        if self.enabled(record.level) {
            self.dispatch(record);
        }
    }

    fn dispatch(&self, record: &LogRecord) {
        for sink in &self.sinks {
            sink.offer(record);
        }
    }

    pub fn error(&self, message: &str, fields: Option<&Fields>) {
        self.emit(Level::Error, message, fields);
    }

    pub fn warn(&self, message: &str, fields: Option<&Fields>) {
        self.emit(Level::Warn, message, fields);
    }

    pub fn info(&self, message: &str, fields: Option<&Fields>) {
        self.emit(Level::Info, message, fields);
    }

    pub fn debug(&self, message: &str, fields: Option<&Fields>) {
        self.emit(Level::Debug, message, fields);
    }
}

/// Shared read-only handle to a facility
#[derive(Debug, Clone)]
pub struct Logger {
    facility: Arc<LogFacility>,
}

impl Logger {
    pub fn new(facility: LogFacility) -> Self {
        Self {
            facility: Arc::new(facility),
        }
    }
}

impl From<LogFacility> for Logger {
    fn from(facility: LogFacility) -> Self {
        Self::new(facility)
    }
}

impl Deref for Logger {
    type Target = LogFacility;

    fn deref(&self) -> &LogFacility {
        &self.facility
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::config::DeploymentMode;
    use crate::internal::logger::format::Format;
    use crate::internal::logger::mock::MemoryWriter;
    use std::io::{self, Write};

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(level: Level) -> (LogFacility, MemoryWriter) {
        let buffer = MemoryWriter::new();
        let facility = LogFacility::new(level).with_sink(Sink::writer(
            "console",
            buffer.clone(),
            level,
            Format::Console { color: false },
        ));
        (facility, buffer)
    }

    #[test]
    fn test_records_below_global_level_are_dropped() {
        let (facility, buffer) = capture(Level::Info);
        facility.debug("x", None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_each_accepted_level_writes_one_line() {
        for global in Level::ALL {
            for level in Level::ALL {
                let (facility, buffer) = capture(global);
                facility.emit(level, "hello", None);
                let lines = buffer.lines();
                if level >= global {
                    assert_eq!(lines.len(), 1, "{} at global {}", level, global);
                    assert!(lines[0].contains("hello"));
                } else {
                    assert!(lines.is_empty(), "{} at global {}", level, global);
                }
            }
        }
    }

    #[test]
    fn test_stricter_sink_filters_after_global() {
        let console = MemoryWriter::new();
        let errors = MemoryWriter::new();
        let facility = LogFacility::new(Level::Debug)
            .with_sink(Sink::writer(
                "console",
                console.clone(),
                Level::Debug,
                Format::Console { color: false },
            ))
            .with_sink(Sink::writer("errors", errors.clone(), Level::Error, Format::Json));

        facility.warn("careful", None);
        facility.error("boom", None);

        assert_eq!(console.lines().len(), 2);
        assert_eq!(errors.lines().len(), 1);
        assert!(errors.contents().contains("boom"));
    }

    #[test]
    fn test_failing_sink_does_not_starve_later_sinks() {
        let healthy = MemoryWriter::new();
        let facility = LogFacility::new(Level::Info)
            .with_sink(Sink::writer("broken", FailingWriter, Level::Info, Format::Json))
            .with_sink(Sink::writer(
                "healthy",
                healthy.clone(),
                Level::Info,
                Format::Json,
            ));

        facility.error("first", None);
        facility.info("second", None);

        let lines = healthy.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""message":"first""#));
        assert!(lines[1].contains(r#""message":"second""#));
    }

    #[test]
    fn test_fields_are_attached() {
        let (facility, buffer) = capture(Level::Info);
        facility.info("login", Some(&Fields::new().with("user", "alice")));
        assert!(buffer.contents().contains(r#""user":"alice""#));
    }

    #[test]
    fn test_development_config_has_console_only() {
        let cfg = LoggingConfig::default();
        let facility = LogFacility::from_config(&cfg).unwrap();
        assert_eq!(facility.sinks().len(), 1);
        assert_eq!(facility.level(), Level::Info);
    }

    #[test]
    fn test_production_config_adds_file_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            level: Level::Warn,
            mode: DeploymentMode::Production,
            logs_dir: dir.path().join("logs"),
            color: false,
        };
        let facility = LogFacility::from_config(&cfg).unwrap();

        let levels: Vec<Level> = facility.sinks().iter().map(Sink::min_level).collect();
        assert_eq!(levels, vec![Level::Warn, Level::Error, Level::Warn]);
        assert!(cfg.error_log_path().exists());
        assert!(cfg.combined_log_path().exists());
    }

    #[test]
    fn test_logger_handle_shares_facility() {
        let (facility, buffer) = capture(Level::Info);
        let logger = Logger::new(facility);
        let clone = logger.clone();
        logger.info("one", None);
        clone.info("two", None);
        assert_eq!(buffer.lines().len(), 2);
    }
}
