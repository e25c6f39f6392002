#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! JSON-lines logging shared by the copilot crates.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Log severity level, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Chatty diagnostics, e.g. chat routing.
    Debug,
    /// Normal agent activity; the default floor.
    #[default]
    Info,
    /// Rejected input.
    Warn,
    /// Failed commands.
    Error,
}

impl LogLevel {
    /// Parses a level name such as `info` or `WARN`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One JSON line in the log file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the record was created (UTC).
    pub timestamp: DateTime<Utc>,
    /// Component that wrote the record.
    pub module: String,
    /// Severity.
    pub level: LogLevel,
    /// Event name, e.g. `agent.report.generated`.
    pub message: String,
    /// Structured fields attached to the event.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Record stamped with the current time and no metadata.
    #[must_use]
    pub fn new(module: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            module: module.into(),
            level,
            message: message.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Copies the fields of a JSON object into the record metadata.
    ///
    /// Non-object values are stored under a single `data` key.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        match metadata {
            serde_json::Value::Object(map) => self.metadata = map,
            serde_json::Value::Null => {}
            other => {
                self.metadata.insert("data".into(), other);
            }
        }
        self
    }
}

/// Append-only JSON-lines logger guarded by a mutex.
#[derive(Debug)]
pub struct JsonLogger {
    path: PathBuf,
    min_level: LogLevel,
    writer: Mutex<File>,
}

impl JsonLogger {
    /// Creates or opens a logger at the desired path, accepting every level.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_min_level(path, LogLevel::Debug)
    }

    /// Creates or opens a logger that drops records below `min_level`.
    pub fn with_min_level(path: impl AsRef<Path>, min_level: LogLevel) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            min_level,
            writer: Mutex::new(file),
        })
    }

    /// Writes a record as one JSON line. Returns `false` when the level filter dropped it.
    pub fn log(&self, record: &LogRecord) -> Result<bool> {
        if record.level < self.min_level {
            return Ok(false);
        }
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(true)
    }

    /// Minimum accepted level.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Returns the underlying file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn appends_record_with_metadata() {
        let dir = tempdir().unwrap();
        let logger = JsonLogger::new(dir.path().join("agent.log")).unwrap();
        let record = LogRecord::new("agent", LogLevel::Info, "agent.report.generated")
            .with_metadata(json!({ "score": 84 }));
        assert!(logger.log(&record).unwrap());
        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("\"message\":\"agent.report.generated\""));
        assert!(content.contains("\"score\":84"));
    }

    #[test]
    fn drops_records_below_minimum() {
        let dir = tempdir().unwrap();
        let logger =
            JsonLogger::with_min_level(dir.path().join("nested/agent.log"), LogLevel::Warn)
                .unwrap();
        assert!(!logger
            .log(&LogRecord::new("agent", LogLevel::Info, "quiet"))
            .unwrap());
        assert!(logger
            .log(&LogRecord::new("agent", LogLevel::Error, "loud"))
            .unwrap());
        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(!content.contains("quiet"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn parses_level_names() {
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse(" debug "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn scalar_metadata_lands_under_data_key() {
        let record = LogRecord::new("agent", LogLevel::Debug, "scalar").with_metadata(json!(3));
        assert_eq!(record.metadata.get("data"), Some(&json!(3)));
    }
}
