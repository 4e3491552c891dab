// Attachment collection for report items

use crate::config::AttachmentOptions;
use crate::state::RawAttachment;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use serde::{Serialize, Serializer};
use tracing::warn;

pub const TRACE_NAME: &str = "trace";
pub const TRACE_CONTENT_TYPE: &str = "application/zip";
pub const VIDEO_NAME: &str = "video";
pub const VIDEO_CONTENT_TYPE: &str = "video/webm";

/// Attachment payload ready to be sent with a log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(serialize_with = "serialize_base64")]
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

fn serialize_base64<S>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(content))
}

fn is_excluded(attachment: &RawAttachment, options: AttachmentOptions) -> bool {
    let matches = |name: &str, content_type: &str| {
        attachment.name == name && attachment.content_type == content_type
    };

    (!options.upload_trace && matches(TRACE_NAME, TRACE_CONTENT_TYPE))
        || (!options.upload_video && matches(VIDEO_NAME, VIDEO_CONTENT_TYPE))
}

async fn load_attachment(attachment: &RawAttachment) -> Option<Attachment> {
    let content = match (&attachment.body, attachment.file_path()) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => {
            // Missing files are expected (e.g. artifacts cleaned up by the runner)
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                return None;
            }

            match tokio::fs::read(path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(
                        "Failed to read attachment '{}' from {}: {}",
                        attachment.name,
                        path.display(),
                        e
                    );
                    return None;
                }
            }
        }
        (None, None) => return None,
    };

    Some(Attachment {
        name: attachment.name.clone(),
        content_type: attachment.content_type.clone(),
        content,
    })
}

/// Collect attachment payloads for a test result.
///
/// Entries without a body or a path are dropped, as are trace and video
/// archives whose upload is disabled. File reads run concurrently; a missing or
/// unreadable file only drops its own entry. Input order is preserved.
pub async fn get_attachments(
    attachments: &[RawAttachment],
    options: AttachmentOptions,
) -> Vec<Attachment> {
    let reads = attachments
        .iter()
        .filter(|attachment| attachment.has_content() && !is_excluded(attachment, options))
        .map(load_attachment);

    join_all(reads).await.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_excluded_only_when_disabled() {
        let trace = RawAttachment::inline(TRACE_NAME, TRACE_CONTENT_TYPE, b"zip".to_vec());
        let options = AttachmentOptions {
            upload_trace: false,
            upload_video: true,
        };

        assert!(is_excluded(&trace, options));
        assert!(!is_excluded(&trace, AttachmentOptions::default()));
    }

    #[test]
    fn test_video_exclusion_requires_matching_type() {
        let options = AttachmentOptions {
            upload_trace: true,
            upload_video: false,
        };

        let webm = RawAttachment::file(VIDEO_NAME, VIDEO_CONTENT_TYPE, "/tmp/v.webm");
        let mp4 = RawAttachment::file(VIDEO_NAME, "video/mp4", "/tmp/v.mp4");

        assert!(is_excluded(&webm, options));
        assert!(!is_excluded(&mp4, options));
    }

    #[test]
    fn test_attachment_serializes_base64() {
        let attachment = Attachment::new("note.txt", "text/plain", b"hello".to_vec());
        let value = serde_json::to_value(&attachment).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"name": "note.txt", "type": "text/plain", "content": "aGVsbG8="})
        );
    }

    #[test]
    fn test_inline_body_returned_as_is() {
        let raw = vec![RawAttachment::inline(
            "data",
            "application/octet-stream",
            vec![0u8, 159, 146, 150],
        )];
        let collected = tokio_test::block_on(get_attachments(&raw, AttachmentOptions::default()));

        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].content, vec![0u8, 159, 146, 150]);
    }
}
