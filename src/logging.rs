use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const DEFAULT_LOG_DIR: &str = "storage/logs";

/// Logs every request with a generated request id, the matched route,
/// status and latency. Severity follows the status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4();

    info!(%request_id, %method, %path, "Incoming request");

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    match status {
        500..=599 => error!(%request_id, %method, %path, status, latency_ms, "Server error"),
        400..=499 => warn!(%request_id, %method, %path, status, latency_ms, "Client error"),
        _ => info!(%request_id, %method, %path, status, latency_ms, "Request completed"),
    }

    response
}

/// Installs the global subscriber: a compact console layer filtered by
/// `RUST_LOG`, a daily error log and a daily JSON log under `LOG_DIR`.
pub fn init_tracing() -> std::io::Result<()> {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    std::fs::create_dir_all(&log_dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(concat!(
            env!("CARGO_CRATE_NAME"),
            "=info,roster_db=info,tower_http=warn,axum::rejection=trace"
        ))
    });

    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let errors = fmt::layer()
        .with_writer(daily(&log_dir, "roster.log"))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::ERROR);

    let structured = fmt::layer()
        .json()
        .with_writer(daily(&log_dir, "roster.json"))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(console)
        .with(errors)
        .with(structured)
        .init();

    info!(log_dir = %log_dir, "Tracing initialized");
    Ok(())
}

fn daily(dir: &str, file_name: &str) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, dir, file_name)
}
