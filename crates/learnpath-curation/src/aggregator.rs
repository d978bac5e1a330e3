//! Candidate aggregation across sub-topic searches.

use std::collections::HashSet;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use learnpath_models::{Candidate, CourseStructure, LearningPreferences, SubTopic};
use learnpath_youtube::{FailureCategory, VideoSearch, YouTubeError, YouTubeResult};

/// A sub-topic search that failed.
#[derive(Debug)]
pub struct TopicFailure {
    pub title: String,
    pub order: u32,
    pub error: YouTubeError,
}

/// Candidates gathered for a course outline.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// In sub-topic order, then search rank
    pub candidates: Vec<Candidate>,
    pub failures: Vec<TopicFailure>,
}

impl Aggregation {
    /// Consume the aggregation, keeping only the first credential or quota error.
    pub fn into_blocking_error(self) -> Option<YouTubeError> {
        self.failures
            .into_iter()
            .map(|f| f.error)
            .find(|e| matches!(e.category(), FailureCategory::Auth | FailureCategory::Quota))
    }
}

/// Search query for one sub-topic: topic, keywords, purpose.
pub fn topic_query(preferences: &LearningPreferences, sub_topic: &SubTopic) -> String {
    let keywords = sub_topic
        .search_keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    join_terms(&[
        preferences.topic.trim(),
        keywords.as_str(),
        preferences.learning_purpose.as_str(),
    ])
}

/// Query used when no outline is available: topic, purpose, intent.
pub fn intent_query(preferences: &LearningPreferences) -> String {
    join_terms(&[
        preferences.topic.trim(),
        preferences.learning_purpose.as_str(),
        preferences.intent().unwrap_or_default(),
    ])
}

/// Query used when an outline produced no candidates.
pub fn tutorial_query(preferences: &LearningPreferences) -> String {
    join_terms(&[
        preferences.topic.trim(),
        preferences.learning_purpose.as_str(),
        "tutorial",
    ])
}

fn join_terms(terms: &[&str]) -> String {
    terms
        .iter()
        .filter(|t| !t.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Search every sub-topic with bounded concurrency.
///
/// Failed searches are recorded and skipped. Results keep sub-topic order
/// regardless of completion order; a video found by several sub-topics is
/// kept under the first.
pub async fn search_sub_topics(
    search: &dyn VideoSearch,
    preferences: &LearningPreferences,
    structure: &CourseStructure,
    per_topic_results: u32,
    max_concurrent: usize,
) -> Aggregation {
    let semaphore = Semaphore::new(max_concurrent.max(1));
    let language = preferences.language.as_str();

    let searches = structure.video_sequence.iter().map(|sub_topic| {
        let semaphore = &semaphore;
        let query = topic_query(preferences, sub_topic);
        async move {
            let result = match semaphore.acquire().await {
                Ok(_permit) => search.search_videos(&query, language, per_topic_results).await,
                Err(_) => Err(YouTubeError::invalid_response("search permit unavailable")),
            };
            (sub_topic, query, result)
        }
    });

    let results = join_all(searches).await;

    let mut aggregation = Aggregation::default();
    let mut seen = HashSet::new();

    for (sub_topic, query, result) in results {
        match result {
            Ok(videos) => {
                debug!(
                    sub_topic = %sub_topic.title,
                    query = %query,
                    found = videos.len(),
                    "Sub-topic search finished"
                );
                for video in videos {
                    if seen.insert(video.video_id.clone()) {
                        aggregation.candidates.push(Candidate::tagged(
                            video,
                            sub_topic.title.clone(),
                            sub_topic.order,
                        ));
                    }
                }
            }
            Err(error) => {
                warn!(
                    sub_topic = %sub_topic.title,
                    query = %query,
                    error = %error,
                    "Sub-topic search failed, skipping"
                );
                aggregation.failures.push(TopicFailure {
                    title: sub_topic.title.clone(),
                    order: sub_topic.order,
                    error,
                });
            }
        }
    }

    aggregation
}

/// Single untagged search.
pub async fn flat_search(
    search: &dyn VideoSearch,
    query: &str,
    language: &str,
    max_results: u32,
) -> YouTubeResult<Vec<Candidate>> {
    let videos = search.search_videos(query, language, max_results).await?;

    let mut seen = HashSet::new();
    Ok(videos
        .into_iter()
        .filter(|v| seen.insert(v.video_id.clone()))
        .map(Candidate::untagged)
        .collect())
}
