//! Object store seam
//!
//! The pipeline only needs two operations from the bucket it is triggered by:
//! read the original and write each thumbnail. The S3 implementation lives in
//! [`s3`]; tests provide their own in-memory store.

pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use s3::S3ObjectStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Access denied: s3://{bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    #[error("Transient storage failure: {0}")]
    Transient(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Read/write access to an object store, keyed by bucket and object key
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full body of an object
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes>;

    /// Create or overwrite an object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;
}
