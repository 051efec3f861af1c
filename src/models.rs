//! Message envelopes and activity receipts.
//!
//! Every envelope is built once, validated before construction, and never
//! mutated afterwards. Optional fields are omitted from the wire format
//! rather than serialized as null, except where the consumer pins a null
//! placeholder (verification `options` / `error`).

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Chat response envelope with optional reasoning, sources, tasks, and
/// UI hints.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteMessage {
    pub message_id: String,
    pub conversation_id: String,
    pub tenant_id: String,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_group_id: Option<String>,
}

/// Optional bag of response components. The whole bag is omitted from the
/// envelope when every slot is empty.
#[derive(Debug, Clone, Serialize)]
pub struct MessageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Reasoning>,
    /// Source objects, passed through verbatim after shape validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Value>,
    /// Task objects, passed through verbatim after shape validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_variant: Option<String>,
}

impl MessageMetadata {
    pub fn is_empty(&self) -> bool {
        self.reasoning.is_none()
            && self.sources.is_none()
            && self.tasks.is_none()
            && self.turn_complete.is_none()
            && self.citation_variant.is_none()
    }
}

/// Reasoning section of a complete message. Activities only emit finished
/// reasoning, so `state` is always `"done"`.
#[derive(Debug, Clone, Serialize)]
pub struct Reasoning {
    pub content: String,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Reasoning {
    pub fn done(content: String, title: Option<String>) -> Self {
        Self {
            content,
            state: "done",
            title,
        }
    }
}

/// Data-source status envelope, discriminated by `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceStatusMessage {
    Sync {
        connection_id: String,
        tenant_id: String,
        status: SyncStatus,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        documents_processed: Option<i64>,
    },
    /// Consumers expect `options` and `error` keys on every verification
    /// message, so absent values serialize as null instead of being skipped.
    Verification {
        connection_id: String,
        tenant_id: String,
        status: VerificationStatus,
        options: Option<Value>,
        error: Option<String>,
    },
}

impl SourceStatusMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Sync { .. } => "sync",
            Self::Verification { .. } => "verification",
        }
    }
}

/// Sync lifecycle statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    SyncStarted,
    SyncCompleted,
    SyncFailed,
}

impl SyncStatus {
    pub const VALUES: &'static [&'static str] =
        &["sync_started", "sync_completed", "sync_failed"];

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "sync_started" => Ok(Self::SyncStarted),
            "sync_completed" => Ok(Self::SyncCompleted),
            "sync_failed" => Ok(Self::SyncFailed),
            _ => Err(format!("status must be one of: {}", Self::VALUES.join(", "))),
        }
    }
}

/// Verification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Success,
    Failed,
}

impl VerificationStatus {
    pub const VALUES: &'static [&'static str] = &["success", "failed"];

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("status must be one of: {}", Self::VALUES.join(", "))),
        }
    }
}

/// Document-processing status envelope.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatusMessage {
    /// Always `"document_processing"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub blob_metadata_id: String,
    pub tenant_id: String,
    pub status: ProcessingStatus,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

pub const DOCUMENT_PROCESSING_KIND: &str = "document_processing";

/// Document-processing outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    ProcessingCompleted,
    ProcessingFailed,
}

impl ProcessingStatus {
    pub const VALUES: &'static [&'static str] = &["processing_completed", "processing_failed"];

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "processing_completed" => Ok(Self::ProcessingCompleted),
            "processing_failed" => Ok(Self::ProcessingFailed),
            _ => Err(format!("status must be one of: {}", Self::VALUES.join(", "))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProcessingCompleted => "processing_completed",
            Self::ProcessingFailed => "processing_failed",
        }
    }
}

/// Success result for the complete-message activity.
#[derive(Debug, Serialize)]
pub struct CompleteReceipt {
    pub status: &'static str,
    pub message_id: String,
    pub message: CompleteMessage,
}

/// Success result for the data-source status activity.
#[derive(Debug, Serialize)]
pub struct SourceStatusReceipt {
    pub status: &'static str,
    pub message_type: &'static str,
    pub connection_id: String,
    pub message: SourceStatusMessage,
}

/// Success result for the document-processing status activity.
#[derive(Debug, Serialize)]
pub struct DocumentStatusReceipt {
    pub status: &'static str,
    pub blob_metadata_id: String,
    pub processing_status: &'static str,
    pub message: DocumentStatusMessage,
}

/// Current UTC time in RFC 3339 with microsecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_message_omits_empty_optionals() {
        let message = CompleteMessage {
            message_id: "m1".into(),
            conversation_id: "c1".into(),
            tenant_id: "t1".into(),
            response: "hi".into(),
            metadata: None,
            response_group_id: None,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "message_id": "m1",
                "conversation_id": "c1",
                "tenant_id": "t1",
                "response": "hi"
            })
        );
    }

    #[test]
    fn test_sync_message_tagged_with_type() {
        let message = SourceStatusMessage::Sync {
            connection_id: "conn".into(),
            tenant_id: "t1".into(),
            status: SyncStatus::SyncStarted,
            timestamp: "2026-01-01T00:00:00+00:00".into(),
            error_message: None,
            documents_processed: None,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "sync");
        assert_eq!(value["status"], "sync_started");
        assert!(value.get("error_message").is_none());
    }

    #[test]
    fn test_verification_message_pins_null_placeholders() {
        let message = SourceStatusMessage::Verification {
            connection_id: "conn".into(),
            tenant_id: "t1".into(),
            status: VerificationStatus::Success,
            options: None,
            error: None,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "verification");
        assert!(value["options"].is_null());
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_status_parse_errors_list_values() {
        let err = SyncStatus::parse("bogus").unwrap_err();
        assert_eq!(
            err,
            "status must be one of: sync_started, sync_completed, sync_failed"
        );
        let err = ProcessingStatus::parse("done").unwrap_err();
        assert_eq!(
            err,
            "status must be one of: processing_completed, processing_failed"
        );
    }

    #[test]
    fn test_now_timestamp_is_utc_rfc3339() {
        let ts = now_timestamp();
        assert!(ts.ends_with("+00:00"), "unexpected timestamp: {ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
