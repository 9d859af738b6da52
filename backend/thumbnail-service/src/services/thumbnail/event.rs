//! Trigger event validation
//!
//! Pulls the bucket and key out of the first record of an S3 notification.
//! Only the first record is consulted; S3 delivers one record per object.

use crate::error::{AppError, Result};
use crate::models::TriggerEvent;

/// Object named by a trigger event
///
/// `event_name`, `event_source` and `size` are carried for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    pub bucket: String,
    pub key: String,
    pub event_name: Option<String>,
    pub event_source: Option<String>,
    pub size: Option<i64>,
}

/// Deserialize a raw runtime payload into a trigger event
pub fn parse_event(payload: serde_json::Value) -> Result<TriggerEvent> {
    Ok(serde_json::from_value(payload)?)
}

/// Extract the source object from the first record
///
/// Keys are used exactly as delivered.
pub fn source_object(event: &TriggerEvent) -> Result<SourceObject> {
    let record = event
        .records
        .first()
        .ok_or_else(|| AppError::MalformedEvent("event contains no records".into()))?;

    let s3 = record
        .s3
        .as_ref()
        .ok_or_else(|| AppError::MalformedEvent("record is missing s3".into()))?;

    let bucket = s3
        .bucket
        .as_ref()
        .and_then(|bucket| bucket.name.clone())
        .ok_or_else(|| AppError::MalformedEvent("record is missing s3.bucket.name".into()))?;

    let object = s3.object.as_ref();
    let key = object
        .and_then(|object| object.key.clone())
        .ok_or_else(|| AppError::MalformedEvent("record is missing s3.object.key".into()))?;

    Ok(SourceObject {
        bucket,
        key,
        event_name: record.event_name.clone(),
        event_source: record.event_source.clone(),
        size: object.and_then(|object| object.size),
    })
}
