use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use shared_event_bus::{EventPublisher, EventRecord, FileEventPublisher};
use shared_logging::{JsonLogger, LogLevel, LogRecord};
use uuid::Uuid;

use crate::config::TelemetryConfig;

/// Collects the optional sinks of an [`AgentTelemetry`] handle.
pub struct AgentTelemetryBuilder {
    source: String,
    log_file: Option<PathBuf>,
    floor: LogLevel,
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl AgentTelemetryBuilder {
    /// No sinks yet; records and events are tagged with `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            log_file: None,
            floor: LogLevel::Debug,
            publishers: Vec::new(),
        }
    }

    /// Builder preloaded with the log file, level floor and event file from `[telemetry]`.
    pub fn from_config(source: impl Into<String>, sinks: &TelemetryConfig) -> Result<Self> {
        let mut builder = Self::new(source).min_level(sinks.level());
        if let Some(path) = &sinks.log_path {
            builder = builder.log_path(path);
        }
        if let Some(path) = &sinks.event_log {
            builder = builder.event_publisher(Arc::new(FileEventPublisher::new(path)?));
        }
        Ok(builder)
    }

    /// Appends JSON-lines records to `path`.
    #[must_use]
    pub fn log_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            log_file: Some(path.into()),
            ..self
        }
    }

    /// Drops log records below `level`.
    #[must_use]
    pub const fn min_level(mut self, level: LogLevel) -> Self {
        self.floor = level;
        self
    }

    /// Adds a publisher; every registered publisher receives every event.
    #[must_use]
    pub fn event_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publishers.push(publisher);
        self
    }

    /// Opens the log file, if any.
    pub fn build(self) -> Result<AgentTelemetry> {
        let logger = match self.log_file {
            Some(path) => Some(JsonLogger::with_min_level(path, self.floor)?),
            None => None,
        };
        Ok(AgentTelemetry {
            sinks: Arc::new(Sinks {
                source: self.source,
                logger,
                publishers: self.publishers,
            }),
        })
    }
}

/// Cheap-to-clone handle over the log file and event publisher.
#[derive(Clone)]
pub struct AgentTelemetry {
    sinks: Arc<Sinks>,
}

impl fmt::Debug for AgentTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = self.sinks.logger.as_ref().map(JsonLogger::path);
        f.debug_struct("AgentTelemetry")
            .field("source", &self.sinks.source)
            .field("log", &log)
            .field("publishers", &self.sinks.publishers.len())
            .finish()
    }
}

struct Sinks {
    source: String,
    logger: Option<JsonLogger>,
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl AgentTelemetry {
    /// Shorthand for [`AgentTelemetryBuilder::new`].
    #[must_use]
    pub fn builder(source: impl Into<String>) -> AgentTelemetryBuilder {
        AgentTelemetryBuilder::new(source)
    }

    /// Writes one record; a no-op without a log file.
    pub fn log(&self, level: LogLevel, message: &str, metadata: Value) -> Result<()> {
        let Some(logger) = &self.sinks.logger else {
            return Ok(());
        };
        logger.log(&LogRecord::new(&self.sinks.source, level, message).with_metadata(metadata))?;
        Ok(())
    }

    /// Publishes one event to every publisher. A failing publisher does not stop the
    /// others; the first failure is returned.
    pub fn event(&self, event_type: &str, payload: Value) -> Result<()> {
        if self.sinks.publishers.is_empty() {
            return Ok(());
        }
        let record = EventRecord {
            id: format!("evt-{}", Uuid::new_v4()),
            source: self.sinks.source.clone(),
            event_type: event_type.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            payload,
        };
        let mut outcome = Ok(());
        for publisher in &self.sinks.publishers {
            if let Err(err) = publisher.publish(record.clone()) {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    }

    /// Whether any event publisher is attached.
    #[must_use]
    pub fn emits_events(&self) -> bool {
        !self.sinks.publishers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_event_bus::MemoryEventBus;
    use tempfile::tempdir;

    #[test]
    fn telemetry_logs_and_emits() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("agent.log");
        let bus = Arc::new(MemoryEventBus::new(8));
        let telemetry = AgentTelemetry::builder("agent")
            .log_path(&log_path)
            .event_publisher(bus.clone())
            .build()
            .unwrap();
        telemetry
            .log(LogLevel::Info, "agent.test", json!({ "score": 95 }))
            .unwrap();
        telemetry
            .event("agent.test", json!({ "cards": 4 }))
            .unwrap();
        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("agent.test"));
        assert!(content.contains("\"score\":95"));
        let events = bus.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, "agent");
        assert!(events[0].id.starts_with("evt-"));
    }

    #[test]
    fn every_publisher_receives_each_event() {
        let dir = tempdir().unwrap();
        let sinks = TelemetryConfig {
            event_log: Some(dir.path().join("events.jsonl")),
            ..TelemetryConfig::default()
        };
        let bus = Arc::new(MemoryEventBus::new(8));
        let telemetry = AgentTelemetryBuilder::from_config("agent", &sinks)
            .unwrap()
            .event_publisher(bus.clone())
            .build()
            .unwrap();
        assert!(telemetry.emits_events());
        telemetry
            .event("agent.report.generated", json!({ "score": 95 }))
            .unwrap();
        assert_eq!(bus.of_type("agent.report.generated").len(), 1);
        let file = std::fs::read_to_string(dir.path().join("events.jsonl")).unwrap();
        assert_eq!(file.lines().count(), 1);
    }

    #[test]
    fn min_level_filters_debug_records() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("agent.log");
        let telemetry = AgentTelemetry::builder("agent")
            .log_path(&log_path)
            .min_level(LogLevel::Warn)
            .build()
            .unwrap();
        telemetry
            .log(LogLevel::Debug, "agent.noise", Value::Null)
            .unwrap();
        telemetry
            .log(LogLevel::Error, "agent.failure", Value::Null)
            .unwrap();
        let content = std::fs::read_to_string(log_path).unwrap_or_default();
        assert!(!content.contains("agent.noise"));
        assert!(content.contains("agent.failure"));
    }
}
