// Report events and the sinks that carry them to the reporter process

use crate::error::EmitError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::warn;

/// Operations understood by the reporter process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    AddAttributes,
    SetDescription,
    SetTestCaseId,
    SetStatus,
    SetLaunchStatus,
    AddLog,
    AddLaunchLog,
}

/// One message to the reporter process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
}

impl Event {
    pub fn new(event_type: EventType, data: Value, suite: Option<String>) -> Self {
        Self {
            event_type,
            data,
            suite,
        }
    }
}

/// Destination for report events
pub trait EventSink: Send + Sync {
    /// Deliver one event. Delivery failures are the sink's problem, never the caller's.
    fn emit(&self, event: &Event);
}

/// Serialize one event to a writer and flush. No separator is appended.
pub fn write_event<W: Write>(writer: &mut W, event: &Event) -> Result<(), EmitError> {
    serde_json::to_writer(&mut *writer, event)?;
    writer.flush()?;
    Ok(())
}

/// Writes events to the process stdout, read by the parent reporter process
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: &Event) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = write_event(&mut stdout, event) {
            warn!("Failed to send {:?} event to reporter: {}", event.event_type, e);
        }
    }
}

/// Writes events to any writer
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> EventSink for WriterSink<W> {
    fn emit(&self, event: &Event) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = write_event(&mut *writer, event) {
            warn!("Failed to write {:?} event: {}", event.event_type, e);
        }
    }
}

/// Keeps events in memory, in emission order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

/// Package `data` into an event and hand it to `sink`
pub fn send_event_to_reporter<S>(sink: &S, event_type: EventType, data: Value, suite: Option<&str>)
where
    S: EventSink + ?Sized,
{
    sink.emit(&Event::new(event_type, data, suite.map(str::to_string)));
}
