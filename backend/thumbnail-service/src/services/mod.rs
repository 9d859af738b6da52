/// Service layer for thumbnails
///
/// - Storage: object store seam and its S3 implementation
/// - Thumbnail: event validation, normalization, resizing and the pipeline itself
pub mod storage;
pub mod thumbnail;

pub use storage::{ObjectStore, S3ObjectStore, StorageError};
pub use thumbnail::ThumbnailService;
