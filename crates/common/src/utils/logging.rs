use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the default tracing subscriber: compact format, stdout writer.
/// `RUST_LOG` wins when set; otherwise request-level events from the HTTP
/// stack are kept at info.
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}

/// Structured JSON variant for container log pipelines. Same filter rules
/// as the default subscriber.
pub fn init_logging_json() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(|| io::stdout())
        .try_init();
}
