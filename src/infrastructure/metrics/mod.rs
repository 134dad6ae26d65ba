//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Heartbeats received and entries evicted by the presence sweeper
//! - Online users as of the last sweep
//! - Sweep pass duration

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

const NAMESPACE: &str = "presence_service";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Heartbeats registered with the presence tracker
pub static PRESENCE_HEARTBEATS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("presence_heartbeats_total", "Total number of heartbeats registered")
            .namespace(NAMESPACE),
    )
    .expect("Failed to create PRESENCE_HEARTBEATS_TOTAL metric")
});

/// Entries removed by sweep passes
pub static PRESENCE_EVICTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("presence_evictions_total", "Total number of expired presence entries evicted")
            .namespace(NAMESPACE),
    )
    .expect("Failed to create PRESENCE_EVICTIONS_TOTAL metric")
});

/// Users online as of the most recent sweep
pub static PRESENCE_ONLINE_USERS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("presence_online_users", "Users online as of the last sweep pass")
            .namespace(NAMESPACE),
    )
    .expect("Failed to create PRESENCE_ONLINE_USERS metric")
});

/// Sweep pass duration histogram
pub static PRESENCE_SWEEP_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    let buckets = vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1];
    Histogram::with_opts(
        HistogramOpts::new(
            "presence_sweep_duration_seconds",
            "Time spent holding the presence table during a sweep pass",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
    )
    .expect("Failed to create PRESENCE_SWEEP_DURATION_SECONDS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(PRESENCE_HEARTBEATS_TOTAL.clone()))
        .expect("Failed to register PRESENCE_HEARTBEATS_TOTAL");
    registry
        .register(Box::new(PRESENCE_EVICTIONS_TOTAL.clone()))
        .expect("Failed to register PRESENCE_EVICTIONS_TOTAL");
    registry
        .register(Box::new(PRESENCE_ONLINE_USERS.clone()))
        .expect("Failed to register PRESENCE_ONLINE_USERS");
    registry
        .register(Box::new(PRESENCE_SWEEP_DURATION_SECONDS.clone()))
        .expect("Failed to register PRESENCE_SWEEP_DURATION_SECONDS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record a registered heartbeat
pub fn record_heartbeat() {
    PRESENCE_HEARTBEATS_TOTAL.inc();
}

/// Helper to record the outcome of a sweep pass
pub fn record_sweep(evicted: usize, remaining: usize, duration_secs: f64) {
    PRESENCE_EVICTIONS_TOTAL.inc_by(evicted as u64);
    PRESENCE_ONLINE_USERS.set(remaining as i64);
    PRESENCE_SWEEP_DURATION_SECONDS.observe(duration_secs);
}
