//! Course assembly pipeline.
//!
//! This crate provides:
//! - Learning score heuristics
//! - Bounded-concurrency candidate aggregation across sub-topics
//! - Duration-budget playlist selection
//! - The orchestrator with its degrade paths, logging and metrics

pub mod aggregator;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod scoring;
pub mod selector;

#[cfg(test)]
mod testing;

pub use config::CurationConfig;
pub use error::{CurationError, CurationResult};
pub use logging::PipelineLogger;
pub use pipeline::{CurationPipeline, CurationRun, DegradeReason, Outcome, Stage};
pub use scoring::{score_candidates, score_video, DurationFit, LearningScore, ScoreInput};
pub use selector::{ensure_non_empty, rank, select, Selection, SelectionPass};
