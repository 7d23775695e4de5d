//! Test fixtures for log facility testing

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::Value;
use sinklog::internal::config::{DeploymentMode, LoggingConfig};
use sinklog::internal::logger::mock::MemoryWriter;
use sinklog::internal::logger::{Format, Level, LogFacility, Sink};

/// A production-mode facility whose console output is captured in memory
pub struct TestFacility {
    pub facility: LogFacility,
    pub console: MemoryWriter,
    pub config: LoggingConfig,
}

impl TestFacility {
    /// Mirrors the production sink layout with the console swapped for a buffer
    pub fn production(logs_dir: &Path, level: Level) -> Self {
        let config = LoggingConfig {
            level,
            mode: DeploymentMode::Production,
            logs_dir: logs_dir.to_path_buf(),
            color: false,
        };
        let console = MemoryWriter::new();
        let facility = LogFacility::new(level)
            .with_sink(Sink::writer(
                "console",
                console.clone(),
                level,
                Format::Console { color: false },
            ))
            .with_sink(Sink::file(config.error_log_path(), Level::Error).unwrap())
            .with_sink(Sink::file(config.combined_log_path(), level).unwrap());

        Self {
            facility,
            console,
            config,
        }
    }

    pub fn error_log(&self) -> Vec<String> {
        read_lines(&self.config.error_log_path())
    }

    pub fn combined_log(&self) -> Vec<String> {
        read_lines(&self.config.combined_log_path())
    }
}

/// Lines of a log file, empty if it does not exist
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Parse a file-sink line
pub fn parse_line(line: &str) -> Value {
    serde_json::from_str(line).expect("file sink line should be valid JSON")
}
