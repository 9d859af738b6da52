//! Shared fixtures for thumbnail-service integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use thumbnail_service::services::storage::{ObjectStore, StorageError, StorageResult};

pub const BUCKET: &str = "rock-photos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get { bucket: String, key: String },
    Put { bucket: String, key: String, content_type: String },
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    NotFound,
    AccessDenied,
    Transient,
}

impl Failure {
    fn into_error(self, bucket: &str, key: &str) -> StorageError {
        match self {
            Failure::NotFound => StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            Failure::AccessDenied => StorageError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            Failure::Transient => StorageError::Transient("simulated outage".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

/// In-memory object store that records every call
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_get: Mutex<Option<Failure>>,
    fail_put: Mutex<Option<(String, Failure)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: Bytes::from(body),
                content_type: content_type.to_string(),
            },
        );
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Fail every read
    pub fn fail_gets_with(&self, failure: Failure) {
        *self.fail_get.lock().unwrap() = Some(failure);
    }

    /// Fail writes whose key contains `fragment`
    pub fn fail_puts_containing(&self, fragment: &str, failure: Failure) {
        *self.fail_put.lock().unwrap() = Some((fragment.to_string(), failure));
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn put_keys(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Put { key, .. } => Some(key),
                StoreCall::Get { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        self.calls.lock().unwrap().push(StoreCall::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if let Some(failure) = *self.fail_get.lock().unwrap() {
            return Err(failure.into_error(bucket, key));
        }

        self.object(bucket, key)
            .map(|object| object.body)
            .ok_or_else(|| Failure::NotFound.into_error(bucket, key))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        self.calls.lock().unwrap().push(StoreCall::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
        });

        if let Some((fragment, failure)) = self.fail_put.lock().unwrap().clone() {
            if key.contains(&fragment) {
                return Err(failure.into_error(bucket, key));
            }
        }

        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}

/// S3 notification for a single object
pub fn s3_event(bucket: &str, key: &str) -> Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{bucket}") },
                "object": { "key": key, "size": 1024 }
            }
        }]
    })
}

pub fn encode(image: &DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode fixture image");
    buf
}

pub fn png(image: &DynamicImage) -> Vec<u8> {
    encode(image, ImageOutputFormat::Png)
}

/// Encode an 8-bit indexed PNG; `trns` holds per-entry alpha for the palette
pub fn indexed_png<F>(width: u32, height: u32, palette: &[[u8; 3]], trns: &[u8], index: F) -> Vec<u8>
where
    F: Fn(u32, u32) -> u8,
{
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(index(x, y));
        }
    }

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(palette.concat());
        if !trns.is_empty() {
            encoder.set_trns(trns.to_vec());
        }
        let mut writer = encoder.write_header().expect("write png header");
        writer.write_image_data(&data).expect("write png data");
        writer.finish().expect("finish png");
    }
    buf
}

pub fn jpeg(image: &DynamicImage) -> Vec<u8> {
    encode(image, ImageOutputFormat::Jpeg(95))
}
