/// S3-backed object store
///
/// Wraps an `aws_sdk_s3::Client` built once at cold start. SDK failures are
/// classified by their service error code; anything unrecognised is treated as
/// transient and left to the invoking runtime's retry policy.
use super::{ObjectStore, StorageError, StorageResult};
use crate::config::S3Config;
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

/// Object store backed by Amazon S3 or an S3-compatible endpoint
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the SDK client from configuration
    ///
    /// Static credentials are used when both keys are set, otherwise the
    /// default provider chain (Lambda execution role, env, profile) applies.
    pub async fn from_config(config: &S3Config) -> Self {
        use aws_sdk_s3::config::Region;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            use aws_sdk_s3::config::Credentials;

            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "thumbnail_service_s3",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Self::new(Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_sdk_error(bucket, key, e))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Transient(format!("Failed to read S3 object body: {e}")))?
            .into_bytes();

        debug!(bucket = %bucket, key = %key, size = body.len(), "Downloaded from S3");
        Ok(body)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| classify_sdk_error(bucket, key, e))?;

        debug!(bucket = %bucket, key = %key, size, "Uploaded to S3");
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum FailureClass {
    NotFound,
    AccessDenied,
    Transient,
}

fn classify_code(code: Option<&str>) -> FailureClass {
    match code {
        Some("NoSuchKey") | Some("NotFound") | Some("NoSuchBucket") => FailureClass::NotFound,
        Some("AccessDenied") | Some("Forbidden") | Some("AllAccessDisabled")
        | Some("InvalidAccessKeyId") | Some("SignatureDoesNotMatch") => {
            FailureClass::AccessDenied
        }
        _ => FailureClass::Transient,
    }
}

fn classify_sdk_error<E, R>(bucket: &str, key: &str, err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let code = err.as_service_error().and_then(|service| service.code());

    match classify_code(code) {
        FailureClass::NotFound => StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        FailureClass::AccessDenied => StorageError::AccessDenied {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        FailureClass::Transient => StorageError::Transient(format!(
            "s3://{bucket}/{key}: {}",
            DisplayErrorContext(&err)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_objects_classify_as_not_found() {
        assert_eq!(classify_code(Some("NoSuchKey")), FailureClass::NotFound);
        assert_eq!(classify_code(Some("NotFound")), FailureClass::NotFound);
        assert_eq!(classify_code(Some("NoSuchBucket")), FailureClass::NotFound);
    }

    #[test]
    fn test_permission_failures_classify_as_access_denied() {
        assert_eq!(classify_code(Some("AccessDenied")), FailureClass::AccessDenied);
        assert_eq!(
            classify_code(Some("SignatureDoesNotMatch")),
            FailureClass::AccessDenied
        );
    }

    #[test]
    fn test_everything_else_is_transient() {
        assert_eq!(classify_code(Some("SlowDown")), FailureClass::Transient);
        assert_eq!(classify_code(Some("InternalError")), FailureClass::Transient);
        assert_eq!(classify_code(None), FailureClass::Transient);
    }
}
