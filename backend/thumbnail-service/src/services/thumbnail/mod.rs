//! Thumbnail generation
//!
//! This module provides the upload-to-thumbnails pipeline:
//! - Event validation and key conventions
//! - Normalizer for decoding and flattening transparency
//! - Processor for resizing and encoding
//! - Service for coordinating download, generation and upload

pub mod event;
pub mod keys;
pub mod normalizer;
pub mod processor;
pub mod service;
pub mod sizes;

pub use event::SourceObject;
pub use normalizer::{ColorMode, NormalizedImage};
pub use processor::{ThumbnailProcessor, ThumbnailResult};
pub use service::{ThumbnailArtifact, ThumbnailService, SKIP_REASON};
pub use sizes::{SizeClass, JPEG_CONTENT_TYPE, JPEG_QUALITY, SIZE_CLASSES};
