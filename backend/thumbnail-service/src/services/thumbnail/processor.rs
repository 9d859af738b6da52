//! Thumbnail processor - derives one thumbnail from a normalized image
//!
//! Shrinks the image to fit a size class while maintaining aspect ratio,
//! and encodes it as JPEG with a fixed quality.
//!
//! Uses `spawn_blocking` for CPU-intensive operations to avoid blocking the async runtime.

use super::sizes::{SizeClass, JPEG_QUALITY};
use crate::error::{AppError, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Configuration for thumbnail generation
#[derive(Clone, Debug)]
pub(crate) struct ThumbnailConfig {
    /// JPEG quality (0-100)
    quality: u8,
    /// Resampling filter used when shrinking
    filter: FilterType,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
            filter: FilterType::Lanczos3,
        }
    }
}

/// Result of thumbnail generation
#[derive(Debug)]
pub struct ThumbnailResult {
    /// The thumbnail image data as JPEG
    pub data: Bytes,
    /// Width of the thumbnail
    pub width: u32,
    /// Height of the thumbnail
    pub height: u32,
}

/// Thumbnail processor
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
}

impl ThumbnailProcessor {
    /// Create a new processor with the given configuration
    pub(crate) fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    /// Generate a thumbnail for one size class (blocking version)
    ///
    /// The source is never mutated; it is shared by every size class of an
    /// invocation. Use `generate_async` from async code.
    pub fn generate(&self, source: &RgbImage, size: &SizeClass) -> Result<ThumbnailResult> {
        let (orig_w, orig_h) = source.dimensions();
        let (new_w, new_h) = size.fit_within(orig_w, orig_h);

        let working = if (new_w, new_h) == (orig_w, orig_h) {
            debug!(size = size.label, "Image already within bounds, encoding as-is");
            source.clone()
        } else {
            image::imageops::resize(source, new_w, new_h, self.config.filter)
        };

        let data = self.encode_jpeg(DynamicImage::ImageRgb8(working))?;

        debug!(
            size = size.label,
            width = new_w,
            height = new_h,
            bytes = data.len(),
            "Thumbnail generated"
        );

        Ok(ThumbnailResult {
            data,
            width: new_w,
            height: new_h,
        })
    }

    /// Generate a thumbnail on the blocking thread pool
    pub async fn generate_async(
        self: Arc<Self>,
        source: Arc<RgbImage>,
        size: SizeClass,
    ) -> Result<ThumbnailResult> {
        tokio::task::spawn_blocking(move || self.generate(&source, &size))
            .await
            .map_err(|e| AppError::Internal(format!("Thumbnail task panicked: {e}")))?
    }

    /// Encode image as JPEG
    fn encode_jpeg(&self, img: DynamicImage) -> Result<Bytes> {
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);

        img.write_to(&mut cursor, ImageOutputFormat::Jpeg(self.config.quality))
            .map_err(|e| AppError::Encode(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}
