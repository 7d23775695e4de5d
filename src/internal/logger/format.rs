// src/internal/logger/format.rs

use colored::{ColoredString, Colorize};
use serde_json::{Map, Value};

use super::record::{Level, LogRecord};

/// Keys owned by the record itself; a field with one of these names is shadowed
pub const RESERVED_KEYS: [&str; 3] = ["level", "message", "timestamp"];

/// How a sink renders a record into a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `level: message {"timestamp":..,"key":..}`, level word optionally colored
    Console { color: bool },
    /// One JSON object per line
    Json,
}

impl Format {
    /// Render `record` as one newline-terminated line
    pub fn render(&self, record: &LogRecord) -> String {
        let mut line = match self {
            Format::Console { color } => console_line(record, *color),
            Format::Json => json_line(record),
        };
        line.push('\n');
        line
    }
}

fn timestamp(record: &LogRecord) -> String {
    record
        .timestamp
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn field_map(record: &LogRecord) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in record.fields.iter() {
        if RESERVED_KEYS.contains(&key) {
            continue;
        }
        // FieldValue serialization cannot fail
        if let Ok(v) = serde_json::to_value(value) {
            map.insert(key.to_string(), v);
        }
    }
    map
}

fn paint(level: Level) -> ColoredString {
    match level {
        Level::Error => level.as_str().red(),
        Level::Warn => level.as_str().yellow(),
        Level::Info => level.as_str().green(),
        Level::Debug => level.as_str().blue(),
    }
}

fn console_line(record: &LogRecord, color: bool) -> String {
    let level = if color {
        paint(record.level).to_string()
    } else {
        record.level.as_str().to_string()
    };

    let mut rest = field_map(record);
    rest.insert("timestamp".to_string(), Value::String(timestamp(record)));

    // Embedded newlines would split the record across lines
    let message = record.message.replace(['\r', '\n'], " ");
    format!("{}: {} {}", level, message, Value::Object(rest))
}

fn json_line(record: &LogRecord) -> String {
    let mut map = field_map(record);
    map.insert(
        "level".to_string(),
        Value::String(record.level.as_str().to_string()),
    );
    map.insert(
        "message".to_string(),
        Value::String(record.message.clone()),
    );
    map.insert("timestamp".to_string(), Value::String(timestamp(record)));
    Value::Object(map).to_string()
}
