//! Thumbnail service - runs the pipeline for one trigger event
//!
//! 1. Validate the event and filter keys outside `/original/`
//! 2. Download the original from the object store
//! 3. Decode and flatten to opaque RGB
//! 4. For each size class in order: shrink, encode, upload
//!
//! Writes are not atomic: if a later size class fails, earlier thumbnails stay
//! in the bucket and the invocation fails.

use super::event::{parse_event, source_object, SourceObject};
use super::keys::{is_original_key, thumbnail_key};
use super::normalizer::decode_and_normalize;
use super::processor::ThumbnailProcessor;
use super::sizes::{SizeClass, JPEG_CONTENT_TYPE, SIZE_CLASSES};
use crate::error::{AppError, Result};
use crate::models::{InvocationOutcome, TriggerEvent};
use crate::services::storage::ObjectStore;
use bytes::Bytes;
use image::RgbImage;
use std::sync::Arc;
use tracing::field::Empty;
use tracing::{error, info, Span};

/// Reason reported for keys outside the input convention
pub const SKIP_REASON: &str = "Not an original image, skipping";

/// One encoded thumbnail ready to be written
#[derive(Debug, Clone)]
pub struct ThumbnailArtifact {
    pub key: String,
    pub content_type: &'static str,
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Thumbnail service for one bucket notification at a time
pub struct ThumbnailService {
    store: Arc<dyn ObjectStore>,
    processor: Arc<ThumbnailProcessor>,
}

impl ThumbnailService {
    /// Create a new thumbnail service writing through `store`
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            processor: Arc::new(ThumbnailProcessor::with_defaults()),
        }
    }

    /// Handle a raw runtime payload
    pub async fn handle_payload(&self, payload: serde_json::Value) -> Result<InvocationOutcome> {
        let event = parse_event(payload).map_err(|e| {
            error!(stage = %e.kind(), error = %e, "Failed to parse trigger event");
            e
        })?;

        self.process_event(&event).await
    }

    /// Process a parsed trigger event
    #[tracing::instrument(skip_all, fields(bucket = Empty, key = Empty))]
    pub async fn process_event(&self, event: &TriggerEvent) -> Result<InvocationOutcome> {
        let source = source_object(event).map_err(|e| {
            error!(stage = %e.kind(), error = %e, "Rejected trigger event");
            e
        })?;

        let span = Span::current();
        span.record("bucket", source.bucket.as_str());
        span.record("key", source.key.as_str());

        if !is_original_key(&source.key) {
            info!(
                key = %source.key,
                event_name = source.event_name.as_deref(),
                event_source = source.event_source.as_deref(),
                size = source.size,
                "Skipping - not in original folder"
            );
            return Ok(InvocationOutcome::Skipped {
                key: source.key,
                reason: SKIP_REASON.to_string(),
            });
        }

        info!(
            bucket = %source.bucket,
            key = %source.key,
            event_name = source.event_name.as_deref(),
            event_source = source.event_source.as_deref(),
            size = source.size,
            "Processing image"
        );

        match self.generate_thumbnails(&source).await {
            Ok(thumbnails) => {
                info!(count = thumbnails.len(), "Thumbnails created successfully");
                Ok(InvocationOutcome::Succeeded {
                    original: source.key,
                    thumbnails,
                })
            }
            Err(e) => {
                error!(
                    bucket = %source.bucket,
                    key = %source.key,
                    stage = %e.kind(),
                    error = %e,
                    "Error processing image"
                );
                Err(e)
            }
        }
    }

    /// Download, normalize, and write every size class; returns the written keys
    async fn generate_thumbnails(&self, source: &SourceObject) -> Result<Vec<String>> {
        let original = self.store.get_object(&source.bucket, &source.key).await?;

        let normalized = tokio::task::spawn_blocking(move || decode_and_normalize(&original))
            .await
            .map_err(|e| AppError::Internal(format!("Decode task panicked: {e}")))??;

        let image = Arc::new(normalized.image);
        let mut created = Vec::with_capacity(SIZE_CLASSES.len());

        for size in SIZE_CLASSES.iter() {
            let artifact = self.render(&image, size, &source.key).await?;

            self.store
                .put_object(
                    &source.bucket,
                    &artifact.key,
                    artifact.data.clone(),
                    artifact.content_type,
                )
                .await?;

            info!(
                size = size.label,
                thumbnail_key = %artifact.key,
                width = artifact.width,
                height = artifact.height,
                bytes = artifact.data.len(),
                "Created thumbnail"
            );
            created.push(artifact.key);
        }

        Ok(created)
    }

    async fn render(
        &self,
        image: &Arc<RgbImage>,
        size: &SizeClass,
        original_key: &str,
    ) -> Result<ThumbnailArtifact> {
        let key = thumbnail_key(original_key, size).ok_or_else(|| {
            AppError::Internal(format!("No thumbnail key for {original_key}"))
        })?;

        let result = self
            .processor
            .clone()
            .generate_async(image.clone(), *size)
            .await?;

        Ok(ThumbnailArtifact {
            key,
            content_type: JPEG_CONTENT_TYPE,
            data: result.data,
            width: result.width,
            height: result.height,
        })
    }
}
