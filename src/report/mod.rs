// Report module - Attributes, attachments and events sent to the reporter process

pub mod api;
pub mod attachments;
pub mod attributes;
pub mod events;

pub use api::{LogLevel, LogRecord, ReportingApi};
pub use attachments::{Attachment, get_attachments};
pub use attributes::{Attribute, code_ref, system_attributes};
pub use events::{
    Event, EventSink, EventType, MemorySink, StdoutSink, WriterSink, send_event_to_reporter,
};
