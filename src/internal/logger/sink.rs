// src/internal/logger/sink.rs

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::format::Format;
use super::record::{Level, LogRecord};
use super::LogError;

/// Writer shared between threads; every line is written under one lock
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write a whole line and flush it while holding the lock
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(line)?;
        writer.flush()
    }
}

/// Where a sink's lines end up
#[derive(Clone)]
pub enum Destination {
    Stdout,
    File { path: PathBuf, writer: SharedWriter },
    Writer { name: String, writer: SharedWriter },
}

impl Destination {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        match self {
            Destination::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(line)?;
                out.flush()
            }
            Destination::File { writer, .. } | Destination::Writer { writer, .. } => {
                writer.write_line(line)
            }
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("stdout"),
            Destination::File { path, .. } => write!(f, "{}", path.display()),
            Destination::Writer { name, .. } => f.write_str(name),
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Destination({})", self)
    }
}

/// An output channel with its own threshold and formatting
#[derive(Debug, Clone)]
pub struct Sink {
    destination: Destination,
    min_level: Level,
    format: Format,
}

impl Sink {
    /// Colorized single-line output on stdout
    pub fn console(min_level: Level, color: bool) -> Self {
        Self {
            destination: Destination::Stdout,
            min_level,
            format: Format::Console { color },
        }
    }

    /// JSON lines appended to `path`; parent directories are created
    pub fn file(path: impl AsRef<Path>, min_level: Level) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path).map_err(|source| LogError::OpenSink {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            destination: Destination::File {
                path,
                writer: SharedWriter::new(file),
            },
            min_level,
            format: Format::Json,
        })
    }

    /// Arbitrary writer, e.g. an in-memory buffer
    pub fn writer<W: Write + Send + 'static>(
        name: impl Into<String>,
        writer: W,
        min_level: Level,
        format: Format,
    ) -> Self {
        Self {
            destination: Destination::Writer {
                name: name.into(),
                writer: SharedWriter::new(writer),
            },
            min_level,
            format,
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn accepts(&self, level: Level) -> bool {
        level.clears(self.min_level)
    }

    /// Render and write `record` if it clears this sink's threshold.
    /// Write failures are reported on stderr and never returned.
    pub fn offer(&self, record: &LogRecord) {
        if !self.accepts(record.level) {
            return;
        }
        let line = self.format.render(record);
        if let Err(e) = self.destination.write_line(line.as_bytes()) {
            eprintln!("sinklog: failed to write to {}: {}", self.destination, e);
        }
    }
}

/// Open a log file for appending, creating it and its directory if needed
fn open_append(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
