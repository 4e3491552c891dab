// Test result structures as reported by the runner

use crate::state::{Annotation, TestOutcome, TestStatus};
use crate::status::{ReportStatus, calculate_rp_status};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Attachment as produced by the runner: in-memory body, file on disk, or neither
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttachment {
    pub name: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_body"
    )]
    pub body: Option<Vec<u8>>,
}

/// Body encodings seen from hosts: byte array, base64 string, Node `Buffer` JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum BodyRepr {
    Bytes(Vec<u8>),
    Base64(String),
    Buffer { data: Vec<u8> },
}

fn deserialize_body<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BodyRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BodyRepr::Bytes(bytes)) | Some(BodyRepr::Buffer { data: bytes }) => Ok(Some(bytes)),
        Some(BodyRepr::Base64(text)) => STANDARD
            .decode(text.as_bytes())
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid base64 attachment body: {}", e))),
    }
}

impl RawAttachment {
    /// Attachment backed by a file on disk
    pub fn file(
        name: impl Into<String>,
        content_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            path: Some(path.into()),
            body: None,
        }
    }

    /// Attachment with inline content
    pub fn inline(
        name: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            path: None,
            body: Some(body.into()),
        }
    }

    /// Path usable for reading, ignoring empty strings
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.path.as_ref().filter(|p| !p.as_os_str().is_empty())
    }

    /// Whether there is anything to upload
    pub fn has_content(&self) -> bool {
        self.body.is_some() || self.file_path().is_some()
    }
}

/// Result of one test attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultInfo {
    pub outcome: TestOutcome,
    pub status: TestStatus,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
}

impl TestResultInfo {
    pub fn new(outcome: TestOutcome, status: TestStatus) -> Self {
        Self {
            outcome,
            status,
            annotations: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_attachment(mut self, attachment: RawAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Normalized report status for this attempt
    pub fn report_status(&self) -> ReportStatus {
        calculate_rp_status(self.outcome, self.status, &self.annotations)
    }
}
