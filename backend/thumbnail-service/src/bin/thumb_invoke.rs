//! Thumb Invoke - run one invocation locally against a real bucket
//!
//! Reads an S3 notification JSON from a file (or stdin when the path is `-`),
//! runs the thumbnail pipeline once, and prints the response the Lambda would
//! have returned.
//!
//! Usage: thumb-invoke <event.json | ->
//!
//! Uses the same environment variables as the Lambda (AWS_REGION, S3_ENDPOINT,
//! S3_FORCE_PATH_STYLE, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, LOG_FORMAT).

use anyhow::{bail, Context};
use std::io::Read;
use std::sync::Arc;
use thumbnail_service::services::{S3ObjectStore, ThumbnailService};
use thumbnail_service::{telemetry, Config};
use tracing::info;

fn read_event(path: &str) -> anyhow::Result<serde_json::Value> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read event file {path}"))?
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    telemetry::init(config.log.format);

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: thumb-invoke <event.json | ->");
    };
    let payload = read_event(&path)?;

    let store = S3ObjectStore::from_config(&config.s3).await;
    let service = ThumbnailService::new(Arc::new(store));

    info!(event = %path, "Invoking thumbnail pipeline");
    let outcome = service.handle_payload(payload).await?;
    let response = outcome.to_response()?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
