//! Tracing subscriber setup shared by the binaries

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_DIRECTIVES: &str = "thumbnail_service=info,thumbnail_lambda=info,thumb_invoke=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber
///
/// JSON output drops timestamps and ANSI colors; CloudWatch stamps each line itself.
pub fn init(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    match format {
        LogFormat::Json => builder
            .json()
            .with_current_span(false)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .init(),
        LogFormat::Text => builder.with_target(false).init(),
    }
}
