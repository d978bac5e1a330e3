//! Curation pipeline orchestration.
//!
//! Structure → per-topic search → selection, with two degrade paths:
//! - outline generation fails: one flat search built from topic, purpose and intent
//! - the outline yields no candidates: one flat "tutorial" search, keeping
//!   the outline's title, description and objectives for the response
//!
//! No stage is retried.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::Instrument;

use learnpath_llm::CourseGenerator;
use learnpath_models::{Candidate, CourseSummary, LearningPreferences, PlaylistResponse};
use learnpath_youtube::VideoSearch;

use crate::aggregator::{flat_search, intent_query, search_sub_topics, tutorial_query};
use crate::config::CurationConfig;
use crate::error::{CurationError, CurationResult};
use crate::logging::PipelineLogger;
use crate::metrics::{
    record_degrade, record_outcome, record_playlist_size, record_topic_search_failures,
};
use crate::scoring::score_candidates;
use crate::selector::{ensure_non_empty, rank, select, SelectionPass};

/// Pipeline stage, for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Structure,
    PerTopicSearch,
    FlatSearch,
    Select,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Structure => "structure",
            Stage::PerTopicSearch => "per_topic_search",
            Stage::FlatSearch => "flat_search",
            Stage::Select => "select",
        }
    }
}

/// Why a run left the primary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// Outline generation failed or returned something unusable
    GenerationFailed,
    /// Every sub-topic search came back empty or failed
    NoTopicCandidates,
    /// Nothing fit the duration budget; top ranked videos returned instead
    DurationIgnored,
}

impl DegradeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradeReason::GenerationFailed => "generation_failed",
            DegradeReason::NoTopicCandidates => "no_topic_candidates",
            DegradeReason::DurationIgnored => "duration_ignored",
        }
    }
}

/// Terminal outcome of a run, for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Degraded,
    Empty,
    UpstreamError,
    Invalid,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Degraded => "degraded",
            Outcome::Empty => "empty",
            Outcome::UpstreamError => "upstream_error",
            Outcome::Invalid => "invalid",
        }
    }

    fn of(result: &CurationResult<CurationRun>) -> Self {
        match result {
            Ok(run) if run.degraded.is_empty() => Outcome::Success,
            Ok(_) => Outcome::Degraded,
            Err(CurationError::EmptyResult) => Outcome::Empty,
            Err(CurationError::Validation(_)) => Outcome::Invalid,
            Err(
                CurationError::UpstreamAuth(_)
                | CurationError::UpstreamQuota(_)
                | CurationError::UpstreamTransient(_),
            ) => Outcome::UpstreamError,
        }
    }
}

/// A successful run with its bookkeeping.
#[derive(Debug, Clone)]
pub struct CurationRun {
    pub response: PlaylistResponse,
    /// Degrade decisions taken, in order
    pub degraded: Vec<DegradeReason>,
    /// Minutes across the returned videos
    pub total_minutes: f64,
    pub pass: SelectionPass,
}

/// Assembles playlists from learner preferences.
#[derive(Clone)]
pub struct CurationPipeline {
    search: Arc<dyn VideoSearch>,
    generator: Arc<dyn CourseGenerator>,
    config: CurationConfig,
}

impl CurationPipeline {
    pub fn new(
        search: Arc<dyn VideoSearch>,
        generator: Arc<dyn CourseGenerator>,
        config: CurationConfig,
    ) -> Self {
        Self {
            search,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    /// Curate a playlist for `preferences`.
    pub async fn curate(
        &self,
        preferences: &LearningPreferences,
        request_id: &str,
    ) -> CurationResult<PlaylistResponse> {
        self.run(preferences, request_id, Utc::now())
            .await
            .map(|run| run.response)
    }

    /// Curate with an explicit reference clock.
    pub async fn run(
        &self,
        preferences: &LearningPreferences,
        request_id: &str,
        now: DateTime<Utc>,
    ) -> CurationResult<CurationRun> {
        let logger = PipelineLogger::new(request_id, preferences.topic.trim());
        let span = logger.create_span();
        let start = Instant::now();

        let result = self.execute(preferences, &logger, now).instrument(span).await;

        let outcome = Outcome::of(&result);
        record_outcome(outcome, start.elapsed().as_secs_f64());
        if let Err(e) = &result {
            logger.log_warning(&format!("Run failed ({}): {}", outcome.as_str(), e));
        }

        result
    }

    async fn execute(
        &self,
        preferences: &LearningPreferences,
        logger: &PipelineLogger,
        now: DateTime<Utc>,
    ) -> CurationResult<CurationRun> {
        preferences.validate().map_err(CurationError::Validation)?;

        let mut degraded = Vec::new();

        logger.log_stage(Stage::Structure, "generating course outline");
        let structure = match self
            .generator
            .generate(
                preferences.topic.trim(),
                preferences.learning_purpose,
                preferences.intent(),
            )
            .await
        {
            Ok(structure) => structure,
            Err(e) => {
                self.degrade(logger, &mut degraded, DegradeReason::GenerationFailed, &e.to_string());

                let query = intent_query(preferences);
                let candidates = self.flat_candidates(preferences, &query, logger).await?;
                if candidates.is_empty() {
                    return Err(CurationError::EmptyResult);
                }
                return self
                    .assemble(candidates, None, preferences, logger, degraded, now)
                    .await;
            }
        };

        logger.log_stage(
            Stage::PerTopicSearch,
            &format!(
                "searching {} sub-topics of \"{}\"",
                structure.video_sequence.len(),
                structure.title
            ),
        );
        let aggregation = search_sub_topics(
            self.search.as_ref(),
            preferences,
            &structure,
            self.config.per_topic_results,
            self.config.max_concurrent_searches,
        )
        .await;
        record_topic_search_failures(aggregation.failures.len());

        let summary = structure.summary();

        if !aggregation.candidates.is_empty() {
            return self
                .assemble(
                    aggregation.candidates,
                    Some(summary),
                    preferences,
                    logger,
                    degraded,
                    now,
                )
                .await;
        }

        self.degrade(
            logger,
            &mut degraded,
            DegradeReason::NoTopicCandidates,
            &format!(
                "{} of {} sub-topic searches failed",
                aggregation.failures.len(),
                structure.video_sequence.len()
            ),
        );

        let query = tutorial_query(preferences);
        let candidates = self.flat_candidates(preferences, &query, logger).await?;
        if candidates.is_empty() {
            // Empty because the platform refused us, not because the topic is empty
            if let Some(error) = aggregation.into_blocking_error() {
                return Err(error.into());
            }
            return Err(CurationError::EmptyResult);
        }

        self.assemble(candidates, Some(summary), preferences, logger, degraded, now)
            .await
    }

    async fn flat_candidates(
        &self,
        preferences: &LearningPreferences,
        query: &str,
        logger: &PipelineLogger,
    ) -> CurationResult<Vec<Candidate>> {
        logger.log_stage(Stage::FlatSearch, &format!("query \"{}\"", query));
        let candidates = flat_search(
            self.search.as_ref(),
            query,
            &preferences.language,
            self.config.flat_results,
        )
        .await?;
        Ok(candidates)
    }

    async fn assemble(
        &self,
        candidates: Vec<Candidate>,
        summary: Option<CourseSummary>,
        preferences: &LearningPreferences,
        logger: &PipelineLogger,
        mut degraded: Vec<DegradeReason>,
        now: DateTime<Utc>,
    ) -> CurationResult<CurationRun> {
        logger.log_stage(
            Stage::Select,
            &format!("scoring {} candidates", candidates.len()),
        );

        let ids: Vec<String> = candidates.iter().map(|c| c.video.video_id.clone()).collect();
        let details = self.search.fetch_details(&ids).await?;

        let scored = score_candidates(candidates, &details, preferences, now);
        if scored.is_empty() {
            logger.log_warning("no candidate had usable metadata");
            return Err(CurationError::EmptyResult);
        }

        let ranked = rank(scored);
        let selection = select(&ranked, preferences.duration, self.config.max_playlist);
        let (selection, duration_ignored) =
            ensure_non_empty(selection, &ranked, self.config.max_playlist);

        if duration_ignored {
            self.degrade(
                logger,
                &mut degraded,
                DegradeReason::DurationIgnored,
                "no video fit the duration budget",
            );
        } else if selection.pass != SelectionPass::Budget {
            logger.log_warning(&format!(
                "duration budget not met by greedy pass ({:?})",
                selection.pass
            ));
        }

        if selection.videos.is_empty() {
            return Err(CurationError::EmptyResult);
        }

        let response = PlaylistResponse {
            videos: selection.videos.iter().map(|v| v.to_public()).collect(),
            course_structure: summary,
        };

        record_playlist_size(response.videos.len());
        logger.log_completion(
            response.videos.len(),
            selection.total_minutes,
            !degraded.is_empty(),
        );

        Ok(CurationRun {
            response,
            degraded,
            total_minutes: selection.total_minutes,
            pass: selection.pass,
        })
    }

    fn degrade(
        &self,
        logger: &PipelineLogger,
        degraded: &mut Vec<DegradeReason>,
        reason: DegradeReason,
        detail: &str,
    ) {
        logger.log_degrade(reason, detail);
        record_degrade(reason);
        degraded.push(reason);
    }
}
