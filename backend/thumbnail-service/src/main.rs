/// Thumbnail Lambda
///
/// Invoked by S3 "object created" notifications. For keys under `/original/`,
/// writes small, medium and large JPEG thumbnails next to the original under
/// `/thumbnails/<size>/`. Any other key is acknowledged and skipped.
///
/// Environment variables:
/// - AWS_REGION: region of the bucket (default: "us-east-1")
/// - S3_ENDPOINT: optional S3-compatible endpoint
/// - S3_FORCE_PATH_STYLE: use path-style addressing (default: false)
/// - AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY: optional static credentials
/// - LOG_FORMAT: "json" or "text" (default: json inside Lambda)
/// - RUST_LOG: tracing filter directives
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use thumbnail_service::models::InvocationResponse;
use thumbnail_service::services::{S3ObjectStore, ThumbnailService};
use thumbnail_service::{telemetry, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    telemetry::init(config.log.format);

    let store = S3ObjectStore::from_config(&config.s3).await;
    let service = Arc::new(ThumbnailService::new(Arc::new(store)));

    info!(
        region = %config.s3.region,
        endpoint = ?config.s3.endpoint,
        "Thumbnail lambda initialized"
    );

    run(service_fn(move |event: LambdaEvent<Value>| {
        let service = service.clone();
        async move { handler(&service, event).await }
    }))
    .await
}

async fn handler(
    service: &ThumbnailService,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "Received trigger event");

    let outcome = service.handle_payload(payload).await?;
    Ok(outcome.to_response()?)
}
