//! Course generator metrics.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Generation requests by outcome.
    pub const REQUESTS_TOTAL: &str = "llm_requests_total";

    /// Generation latency in seconds.
    pub const LATENCY_SECONDS: &str = "llm_latency_seconds";
}

/// Record a completed generation call. `status` is `"ok"` or an error kind.
pub fn record_request(model: &str, status: &str, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "model" => model.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(names::LATENCY_SECONDS, "model" => model.to_string()).record(latency_ms / 1000.0);
}
