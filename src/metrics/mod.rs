//! Metrics collection for observability

use prometheus::{
    CounterVec, HistogramVec, Opts, Registry,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Where an intelligence answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// Remote backend answered
    Remote,
    /// Remote backend not usable, heuristic used directly
    Offline,
    /// Remote backend attempted and failed, heuristic used instead
    Fallback,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Offline => "offline",
            Self::Fallback => "fallback",
        }
    }
}

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Text intelligence metrics
    pub intelligence_requests: CounterVec,
    pub remote_failures: CounterVec,
    pub intelligence_duration: HistogramVec,

    // Snooze store metrics
    pub snooze_requests: CounterVec,
    pub snooze_request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let intelligence_requests = register_counter_vec_with_registry!(
            Opts::new("intelligence_requests_total", "Summarize/classify calls by result source"),
            &["operation", "source"],
            registry
        )?;

        let remote_failures = register_counter_vec_with_registry!(
            Opts::new("intelligence_remote_failures_total", "Remote generation failures by reason"),
            &["operation", "reason"],
            registry
        )?;

        let intelligence_duration = register_histogram_vec_with_registry!(
            "intelligence_duration_seconds",
            "Summarize/classify duration in seconds",
            &["operation"],
            registry
        )?;

        let snooze_requests = register_counter_vec_with_registry!(
            Opts::new("snooze_requests_total", "Total snooze store requests"),
            &["operation", "status"],
            registry
        )?;

        let snooze_request_duration = register_histogram_vec_with_registry!(
            "snooze_request_duration_seconds",
            "Snooze store request duration in seconds",
            &["operation"],
            registry
        )?;

        Ok(Self {
            registry,
            intelligence_requests,
            remote_failures,
            intelligence_duration,
            snooze_requests,
            snooze_request_duration,
        })
    }

    /// Record a summarize/classify outcome
    pub fn record_intelligence(&self, operation: &str, source: ResultSource, seconds: f64) {
        self.intelligence_requests
            .with_label_values(&[operation, source.as_str()])
            .inc();
        self.intelligence_duration
            .with_label_values(&[operation])
            .observe(seconds);
    }

    /// Record a failed remote attempt
    pub fn record_remote_failure(&self, operation: &str, reason: &str) {
        self.remote_failures.with_label_values(&[operation, reason]).inc();
    }

    /// Record a snooze store request
    pub fn record_snooze(&self, operation: &str, success: bool, seconds: f64) {
        let status = if success { "success" } else { "error" };
        self.snooze_requests.with_label_values(&[operation, status]).inc();
        self.snooze_request_duration
            .with_label_values(&[operation])
            .observe(seconds);
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
