#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Event sinks used by the copilot crates to trace agent activity.

use std::{
    collections::VecDeque,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Something the agent did, serialized as one JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    /// `evt-<uuid>`.
    pub id: String,
    /// Telemetry source that emitted it.
    pub source: String,
    /// Event type (e.g., `agent.report.generated`).
    pub event_type: String,
    /// RFC 3339 emission time.
    pub timestamp: String,
    /// Event-specific fields.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Sink for [`EventRecord`]s.
pub trait EventPublisher: Send + Sync {
    /// Publishes an event.
    fn publish(&self, event: EventRecord) -> Result<()>;
}

/// Bounded in-memory backlog of recent events.
#[derive(Debug, Clone)]
pub struct MemoryEventBus {
    capacity: usize,
    backlog: Arc<Mutex<VecDeque<EventRecord>>>,
}

impl MemoryEventBus {
    /// Creates a new bus retaining at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            backlog: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Snapshot of recent events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.backlog.lock().iter().cloned().collect()
    }

    /// Events of the given type currently retained.
    #[must_use]
    pub fn of_type(&self, event_type: &str) -> Vec<EventRecord> {
        self.backlog
            .lock()
            .iter()
            .filter(|event| event.event_type == event_type)
            .cloned()
            .collect()
    }
}

impl EventPublisher for MemoryEventBus {
    fn publish(&self, event: EventRecord) -> Result<()> {
        let mut backlog = self.backlog.lock();
        backlog.push_back(event);
        while backlog.len() > self.capacity {
            backlog.pop_front();
        }
        Ok(())
    }
}

/// Publisher appending JSON lines to a file.
#[derive(Debug, Clone)]
pub struct FileEventPublisher {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileEventPublisher {
    /// Creates parent directories; the file itself is opened per event.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Arc::new(Mutex::new(())),
        })
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventPublisher for FileEventPublisher {
    fn publish(&self, event: EventRecord) -> Result<()> {
        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut data = serde_json::to_vec(&event)?;
        data.push(b'\n');
        file.write_all(&data)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_event(event_type: &str) -> EventRecord {
        EventRecord {
            id: "evt-test".into(),
            source: "agent".into(),
            event_type: event_type.into(),
            timestamp: "2026-10-17T00:00:00Z".into(),
            payload: serde_json::json!({"score": 84}),
        }
    }

    #[test]
    fn memory_bus_keeps_bounded_backlog() {
        let bus = MemoryEventBus::new(2);
        bus.publish(sample_event("a")).unwrap();
        bus.publish(sample_event("b")).unwrap();
        bus.publish(sample_event("c")).unwrap();
        let types: Vec<_> = bus
            .snapshot()
            .into_iter()
            .map(|event| event.event_type)
            .collect();
        assert_eq!(types, vec!["b", "c"]);
        assert_eq!(bus.of_type("c").len(), 1);
    }

    #[test]
    fn file_publisher_appends_one_line_per_event() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events/agent.jsonl");
        let publisher = FileEventPublisher::new(&path).unwrap();
        publisher
            .publish(sample_event("agent.report.generated"))
            .unwrap();
        publisher.publish(sample_event("agent.chat.replied")).unwrap();
        let content = std::fs::read_to_string(publisher.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("agent.report.generated"));
    }
}
