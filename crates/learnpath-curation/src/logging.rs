//! Structured pipeline logging.
//!
//! Every curation run logs through a [`PipelineLogger`] so stage events carry
//! the same request id and topic.

use tracing::{info, warn, Span};

use crate::pipeline::{DegradeReason, Stage};

/// Logger for one curation run.
#[derive(Debug, Clone)]
pub struct PipelineLogger {
    request_id: String,
    topic: String,
}

impl PipelineLogger {
    pub fn new(request_id: &str, topic: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            topic: topic.to_string(),
        }
    }

    /// Log the start of a stage.
    pub fn log_stage(&self, stage: Stage, message: &str) {
        info!(
            request_id = %self.request_id,
            topic = %self.topic,
            stage = stage.as_str(),
            "Stage started: {}", message
        );
    }

    /// Log a degrade decision.
    pub fn log_degrade(&self, reason: DegradeReason, message: &str) {
        warn!(
            request_id = %self.request_id,
            topic = %self.topic,
            reason = reason.as_str(),
            "Pipeline degraded: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            request_id = %self.request_id,
            topic = %self.topic,
            "Pipeline warning: {}", message
        );
    }

    /// Log the end of a run.
    pub fn log_completion(&self, videos: usize, total_minutes: f64, degraded: bool) {
        info!(
            request_id = %self.request_id,
            topic = %self.topic,
            videos = videos,
            total_minutes = total_minutes.round() as u64,
            degraded = degraded,
            "Playlist assembled"
        );
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Span wrapping a whole run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "curation",
            request_id = %self.request_id,
            topic = %self.topic
        )
    }
}
