//! Prometheus metrics.
//!
//! Recording is skipped entirely when `OBSERVABILITY_ENABLED` is `false` or
//! `0`; the exporter is then never installed either.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

const REQUEST_DURATION: &str = "http_request_duration_seconds";
const LATENCY_BUCKETS: [f64; 10] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

static ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_observability_enabled() -> bool {
    *ENABLED.get_or_init(|| match std::env::var("OBSERVABILITY_ENABLED") {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0"),
        Err(_) => true,
    })
}

/// Installs the global Prometheus recorder and its upkeep task.
/// Returns `Ok(None)` when observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.to_string()), &LATENCY_BUCKETS)?
        .install_recorder()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Serves the rendered registry at `/metrics` on the metrics listener.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

/// Counts requests and observes their latency, labelled by route template
/// where one matched.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let route = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => req.uri().path().to_string(),
    };

    let active = gauge!("http_requests_active");
    active.increment(1.0);
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed = started.elapsed().as_secs_f64();
    active.decrement(1.0);

    let status = response.status().as_u16().to_string();
    histogram!(REQUEST_DURATION, "method" => method.clone(), "path" => route.clone())
        .record(elapsed);
    counter!("http_requests_total", "method" => method, "path" => route, "status" => status)
        .increment(1);

    response
}

/// Domain events worth counting.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    Login { success: bool },
    UserRegistered,
    TokenIssued,
    TokenChecked { valid: bool },
    AccessChecked { allowed: bool, required: &'a str },
    PersonCreated,
}

pub fn record(event: Event<'_>) {
    if !is_observability_enabled() {
        return;
    }

    match event {
        Event::Login { success } => {
            let outcome = if success { "success" } else { "failure" };
            counter!("user_logins_total", "status" => outcome).increment(1);
        }
        Event::UserRegistered => counter!("users_registered_total").increment(1),
        Event::TokenIssued => counter!("jwt_tokens_issued_total").increment(1),
        Event::TokenChecked { valid } => {
            let outcome = if valid { "valid" } else { "invalid" };
            counter!("jwt_validations_total", "status" => outcome).increment(1);
        }
        Event::AccessChecked { allowed, required } => {
            let outcome = if allowed { "allowed" } else { "denied" };
            counter!(
                "authorization_checks_total",
                "required" => required.to_string(),
                "status" => outcome
            )
            .increment(1);
        }
        Event::PersonCreated => counter!("persons_created_total").increment(1),
    }
}
