//! Configuration management for thumbnail-service
//!
//! Loads configuration from environment variables with sensible defaults.
//! Thumbnail sizes and JPEG quality are constants in `services::thumbnail::sizes`.

#[derive(Clone, Debug)]
pub struct Config {
    pub s3: S3Config,
    pub log: LogConfig,
}

#[derive(Clone, Debug)]
pub struct S3Config {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Custom endpoint for S3-compatible storage such as MinIO
    pub endpoint: Option<String>,
    pub force_path_style: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let in_lambda = lookup("AWS_LAMBDA_FUNCTION_NAME").is_some();

        Config {
            s3: S3Config {
                region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: lookup("AWS_ACCESS_KEY_ID"),
                secret_access_key: lookup("AWS_SECRET_ACCESS_KEY"),
                endpoint: lookup("S3_ENDPOINT").filter(|v| !v.is_empty()),
                force_path_style: lookup("S3_FORCE_PATH_STYLE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
            },
            log: LogConfig {
                format: match lookup("LOG_FORMAT").as_deref() {
                    Some("json") => LogFormat::Json,
                    Some("text") => LogFormat::Text,
                    _ if in_lambda => LogFormat::Json,
                    _ => LogFormat::Text,
                },
            },
        }
    }
}
