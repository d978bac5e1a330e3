//! Curation pipeline metrics.
//!
//! - Run outcomes and degrade reasons
//! - End-to-end latency and playlist size

use metrics::{counter, histogram};

use crate::pipeline::{DegradeReason, Outcome};

/// Metric name constants for consistency.
pub mod names {
    /// Curation runs by outcome.
    pub const RUNS_TOTAL: &str = "curation_runs_total";

    /// Degrade decisions by reason.
    pub const DEGRADES_TOTAL: &str = "curation_degrades_total";

    /// End-to-end run duration in seconds.
    pub const DURATION_SECONDS: &str = "curation_duration_seconds";

    /// Videos per returned playlist.
    pub const PLAYLIST_SIZE: &str = "curation_playlist_size";

    /// Sub-topic searches that failed.
    pub const TOPIC_SEARCH_FAILURES_TOTAL: &str = "curation_topic_search_failures_total";
}

pub fn record_outcome(outcome: Outcome, duration_secs: f64) {
    counter!(names::RUNS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    histogram!(names::DURATION_SECONDS, "outcome" => outcome.as_str()).record(duration_secs);
}

pub fn record_degrade(reason: DegradeReason) {
    counter!(names::DEGRADES_TOTAL, "reason" => reason.as_str()).increment(1);
}

pub fn record_playlist_size(videos: usize) {
    histogram!(names::PLAYLIST_SIZE).record(videos as f64);
}

pub fn record_topic_search_failures(count: usize) {
    if count > 0 {
        counter!(names::TOPIC_SEARCH_FAILURES_TOTAL).increment(count as u64);
    }
}
