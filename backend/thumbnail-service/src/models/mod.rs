/// Data models for thumbnail-service
///
/// Wire types for the inbound S3 notification and the response returned to
/// the Lambda runtime. Fields are optional on the wire so that a missing field
/// surfaces as a malformed-event error naming the field, rather than a generic
/// deserialization failure.
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// S3 "object created" notification
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_name: Option<String>,
    pub event_source: Option<String>,
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: Option<S3Bucket>,
    pub object: Option<S3ObjectRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    pub key: Option<String>,
    pub size: Option<i64>,
}

/// Result of one successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Key is outside the `/original/` convention; nothing was read or written
    Skipped { key: String, reason: String },
    /// Every size class was written
    Succeeded {
        original: String,
        thumbnails: Vec<String>,
    },
}

impl InvocationOutcome {
    /// Render as the `{statusCode, body}` shape expected by the invoker
    pub fn to_response(&self) -> Result<InvocationResponse> {
        let body = match self {
            InvocationOutcome::Skipped { reason, .. } => ResponseBody::Skipped {
                skipped: true,
                reason,
            },
            InvocationOutcome::Succeeded {
                original,
                thumbnails,
            } => ResponseBody::Created {
                message: "Thumbnails created successfully",
                original,
                thumbnails,
            },
        };

        let body = serde_json::to_string(&body)
            .map_err(|e| AppError::Internal(format!("Failed to serialize response: {e}")))?;

        Ok(InvocationResponse {
            status_code: 200,
            body,
        })
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ResponseBody<'a> {
    Skipped {
        skipped: bool,
        reason: &'a str,
    },
    Created {
        message: &'a str,
        original: &'a str,
        thumbnails: &'a [String],
    },
}

/// Response handed back to the Lambda runtime
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    /// JSON-encoded body
    pub body: String,
}
