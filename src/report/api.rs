// Reporting API used from inside tests

use super::attachments::Attachment;
use super::attributes::Attribute;
use super::events::{EventSink, EventType, StdoutSink, send_event_to_reporter};
use crate::status::ReportStatus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Log levels accepted by the reporting server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Payload of `ADD_LOG` / `ADD_LAUNCH_LOG`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Attachment>,
}

/// Thin wrappers turning calls into report events.
///
/// `suite` targets the enclosing suite instead of the current test.
#[derive(Clone)]
pub struct ReportingApi {
    sink: Arc<dyn EventSink>,
}

impl Default for ReportingApi {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ReportingApi {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// API writing to the process stdout
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }

    fn send<T: Serialize>(&self, event_type: EventType, data: &T, suite: Option<&str>) {
        match serde_json::to_value(data) {
            Ok(value) => send_event_to_reporter(self.sink.as_ref(), event_type, value, suite),
            Err(e) => error!("Failed to encode {:?} payload: {}", event_type, e),
        }
    }

    pub fn add_attributes(&self, attributes: &[Attribute], suite: Option<&str>) {
        self.send(EventType::AddAttributes, &attributes, suite);
    }

    pub fn set_description(&self, description: &str, suite: Option<&str>) {
        self.send(EventType::SetDescription, &description, suite);
    }

    pub fn set_test_case_id(&self, test_case_id: &str, suite: Option<&str>) {
        self.send(EventType::SetTestCaseId, &test_case_id, suite);
    }

    pub fn set_status(&self, status: ReportStatus, suite: Option<&str>) {
        self.send(EventType::SetStatus, &status, suite);
    }

    pub fn set_status_passed(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Passed, suite);
    }

    pub fn set_status_failed(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Failed, suite);
    }

    pub fn set_status_skipped(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Skipped, suite);
    }

    pub fn set_status_stopped(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Stopped, suite);
    }

    pub fn set_status_interrupted(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Interrupted, suite);
    }

    pub fn set_status_cancelled(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Cancelled, suite);
    }

    pub fn set_status_info(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Info, suite);
    }

    pub fn set_status_warn(&self, suite: Option<&str>) {
        self.set_status(ReportStatus::Warn, suite);
    }

    pub fn set_launch_status(&self, status: ReportStatus) {
        self.send(EventType::SetLaunchStatus, &status, None);
    }

    pub fn set_launch_status_passed(&self) {
        self.set_launch_status(ReportStatus::Passed);
    }

    pub fn set_launch_status_failed(&self) {
        self.set_launch_status(ReportStatus::Failed);
    }

    pub fn set_launch_status_skipped(&self) {
        self.set_launch_status(ReportStatus::Skipped);
    }

    pub fn set_launch_status_stopped(&self) {
        self.set_launch_status(ReportStatus::Stopped);
    }

    pub fn set_launch_status_interrupted(&self) {
        self.set_launch_status(ReportStatus::Interrupted);
    }

    pub fn set_launch_status_cancelled(&self) {
        self.set_launch_status(ReportStatus::Cancelled);
    }

    pub fn set_launch_status_info(&self) {
        self.set_launch_status(ReportStatus::Info);
    }

    pub fn set_launch_status_warn(&self) {
        self.set_launch_status(ReportStatus::Warn);
    }

    /// Log entry on the current test (or `suite`)
    pub fn log(
        &self,
        level: LogLevel,
        message: &str,
        file: Option<Attachment>,
        suite: Option<&str>,
    ) {
        let record = LogRecord {
            level,
            message: message.to_string(),
            file,
        };
        self.send(EventType::AddLog, &record, suite);
    }

    pub fn trace(&self, message: &str, file: Option<Attachment>, suite: Option<&str>) {
        self.log(LogLevel::Trace, message, file, suite);
    }

    pub fn debug(&self, message: &str, file: Option<Attachment>, suite: Option<&str>) {
        self.log(LogLevel::Debug, message, file, suite);
    }

    pub fn info(&self, message: &str, file: Option<Attachment>, suite: Option<&str>) {
        self.log(LogLevel::Info, message, file, suite);
    }

    pub fn warn(&self, message: &str, file: Option<Attachment>, suite: Option<&str>) {
        self.log(LogLevel::Warn, message, file, suite);
    }

    pub fn error(&self, message: &str, file: Option<Attachment>, suite: Option<&str>) {
        self.log(LogLevel::Error, message, file, suite);
    }

    pub fn fatal(&self, message: &str, file: Option<Attachment>, suite: Option<&str>) {
        self.log(LogLevel::Fatal, message, file, suite);
    }

    /// Log entry on the launch itself
    pub fn launch_log(&self, level: LogLevel, message: &str, file: Option<Attachment>) {
        let record = LogRecord {
            level,
            message: message.to_string(),
            file,
        };
        self.send(EventType::AddLaunchLog, &record, None);
    }

    pub fn launch_trace(&self, message: &str, file: Option<Attachment>) {
        self.launch_log(LogLevel::Trace, message, file);
    }

    pub fn launch_debug(&self, message: &str, file: Option<Attachment>) {
        self.launch_log(LogLevel::Debug, message, file);
    }

    pub fn launch_info(&self, message: &str, file: Option<Attachment>) {
        self.launch_log(LogLevel::Info, message, file);
    }

    pub fn launch_warn(&self, message: &str, file: Option<Attachment>) {
        self.launch_log(LogLevel::Warn, message, file);
    }

    pub fn launch_error(&self, message: &str, file: Option<Attachment>) {
        self.launch_log(LogLevel::Error, message, file);
    }

    pub fn launch_fatal(&self, message: &str, file: Option<Attachment>) {
        self.launch_log(LogLevel::Fatal, message, file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::events::MemorySink;
    use serde_json::json;

    fn api() -> (ReportingApi, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (ReportingApi::new(sink.clone()), sink)
    }

    #[test]
    fn test_status_shortcuts() {
        let (api, sink) = api();
        api.set_status_passed(None);
        api.set_status_failed(None);
        api.set_status_skipped(None);
        api.set_status_stopped(None);
        api.set_status_interrupted(None);
        api.set_status_cancelled(None);
        api.set_status_info(None);
        api.set_status_warn(Some("Suite"));

        let events = sink.events();
        let statuses: Vec<_> = events.iter().map(|e| e.data.clone()).collect();
        let expected: Vec<_> = ReportStatus::ALL.iter().map(|s| json!(s.as_str())).collect();

        assert_eq!(statuses, expected);
        assert!(events.iter().all(|e| e.event_type == EventType::SetStatus));
        assert_eq!(events[7].suite.as_deref(), Some("Suite"));
    }

    #[test]
    fn test_launch_status_shortcuts() {
        let (api, sink) = api();
        api.set_launch_status_passed();
        api.set_launch_status_failed();
        api.set_launch_status_skipped();
        api.set_launch_status_stopped();
        api.set_launch_status_interrupted();
        api.set_launch_status_cancelled();
        api.set_launch_status_info();
        api.set_launch_status_warn();

        let events = sink.events();
        assert_eq!(events.len(), 8);
        assert!(
            events
                .iter()
                .all(|e| e.event_type == EventType::SetLaunchStatus && e.suite.is_none())
        );
        assert_eq!(events[5].data, json!("cancelled"));
    }

    #[test]
    fn test_log_levels() {
        let (api, sink) = api();
        api.trace("t", None, None);
        api.debug("d", None, None);
        api.info("i", None, None);
        api.warn("w", None, None);
        api.error("e", None, None);
        api.fatal("f", None, Some("Suite"));

        let levels: Vec<_> = sink.events().iter().map(|e| e.data["level"].clone()).collect();
        assert_eq!(
            levels,
            vec![
                json!("TRACE"),
                json!("DEBUG"),
                json!("INFO"),
                json!("WARN"),
                json!("ERROR"),
                json!("FATAL")
            ]
        );
    }

    #[test]
    fn test_launch_log_with_file() {
        let (api, sink) = api();
        let file = Attachment::new("out.txt", "text/plain", b"ok".to_vec());
        api.launch_info("launch finished", Some(file));
        api.launch_error("plain", None);

        let events = sink.events();
        assert_eq!(events[0].event_type, EventType::AddLaunchLog);
        assert_eq!(
            events[0].data,
            json!({
                "level": "INFO",
                "message": "launch finished",
                "file": {"name": "out.txt", "type": "text/plain", "content": "b2s="}
            })
        );
        assert!(events[1].data.get("file").is_none());
    }
}
