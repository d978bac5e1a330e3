//! In-memory fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use learnpath_llm::{CourseGenerator, LlmError, LlmResult};
use learnpath_models::{
    CourseStructure, DurationBucket, LearningPreferences, LearningPurpose, ScoredVideo,
    SearchResult, SubTopic, VideoDetails,
};
use learnpath_youtube::{VideoSearch, YouTubeError, YouTubeResult};

type ErrorFactory = Box<dyn Fn() -> YouTubeError + Send + Sync>;

pub fn prefs(topic: &str, purpose: LearningPurpose, duration: DurationBucket) -> LearningPreferences {
    LearningPreferences {
        topic: topic.to_string(),
        learning_purpose: purpose,
        duration,
        language: "en".to_string(),
        intent: None,
    }
}

pub fn search_result(id: &str) -> SearchResult {
    SearchResult {
        video_id: id.to_string(),
        title: format!("Video {}", id),
        channel_name: "Some Channel".to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
        published_at: "2015-01-01T00:00:00Z".to_string(),
        description: String::new(),
    }
}

pub fn scored(id: &str, order: u32, score: u8, minutes: f64) -> ScoredVideo {
    ScoredVideo {
        video: search_result(id),
        details: VideoDetails {
            duration_code: format!("PT{}M", minutes as u64),
            view_count: 0,
        },
        duration_minutes: minutes,
        learning_score: score,
        reasons: vec![],
        course_order: order,
        course_topic: format!("Topic {}", order),
    }
}

pub fn sub_topic(order: u32, title: &str, keywords: &[&str]) -> SubTopic {
    SubTopic {
        order,
        title: title.to_string(),
        description: String::new(),
        search_keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

pub fn outline(title: &str, sub_topics: Vec<SubTopic>) -> CourseStructure {
    CourseStructure {
        title: title.to_string(),
        description: format!("About {}", title),
        learning_objectives: vec!["Understand the basics".to_string()],
        video_sequence: sub_topics,
    }
}

/// Scripted `VideoSearch`. Unknown queries return no results.
#[derive(Default)]
pub struct FakeSearch {
    results: HashMap<String, Vec<SearchResult>>,
    errors: HashMap<String, ErrorFactory>,
    delays: HashMap<String, u64>,
    details: HashMap<String, VideoDetails>,
    details_error: Option<ErrorFactory>,
    calls: Mutex<Vec<(String, u32)>>,
    detail_calls: Mutex<usize>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, videos: Vec<SearchResult>) -> Self {
        self.results.insert(query.to_string(), videos);
        self
    }

    pub fn with_error(
        mut self,
        query: &str,
        error: impl Fn() -> YouTubeError + Send + Sync + 'static,
    ) -> Self {
        self.errors.insert(query.to_string(), Box::new(error));
        self
    }

    pub fn with_delay(mut self, query: &str, millis: u64) -> Self {
        self.delays.insert(query.to_string(), millis);
        self
    }

    pub fn with_details(mut self, id: &str, duration_code: &str, view_count: u64) -> Self {
        self.details.insert(
            id.to_string(),
            VideoDetails {
                duration_code: duration_code.to_string(),
                view_count,
            },
        );
        self
    }

    pub fn with_details_error(
        mut self,
        error: impl Fn() -> YouTubeError + Send + Sync + 'static,
    ) -> Self {
        self.details_error = Some(Box::new(error));
        self
    }

    /// `(query, max_results)` for every search, in call order.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|(q, _)| q).collect()
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.lock().map(|c| *c).unwrap_or_default()
    }
}

#[async_trait]
impl VideoSearch for FakeSearch {
    async fn search_videos(
        &self,
        query: &str,
        _language: &str,
        max_results: u32,
    ) -> YouTubeResult<Vec<SearchResult>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((query.to_string(), max_results));
        }

        if let Some(millis) = self.delays.get(query) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        if let Some(error) = self.errors.get(query) {
            return Err(error());
        }

        let mut videos = self.results.get(query).cloned().unwrap_or_default();
        videos.truncate(max_results as usize);
        Ok(videos)
    }

    async fn fetch_details(&self, ids: &[String]) -> YouTubeResult<HashMap<String, VideoDetails>> {
        if let Ok(mut calls) = self.detail_calls.lock() {
            *calls += 1;
        }

        if let Some(error) = &self.details_error {
            return Err(error());
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.details.get(id).map(|d| (id.clone(), d.clone())))
            .collect())
    }
}

/// `CourseGenerator` returning a fixed outline, or failing.
pub struct FakeGenerator {
    outline: Option<CourseStructure>,
}

impl FakeGenerator {
    pub fn returning(outline: CourseStructure) -> Self {
        Self {
            outline: Some(outline),
        }
    }

    pub fn failing() -> Self {
        Self { outline: None }
    }
}

#[async_trait]
impl CourseGenerator for FakeGenerator {
    async fn generate(
        &self,
        _topic: &str,
        _purpose: LearningPurpose,
        _intent: Option<&str>,
    ) -> LlmResult<CourseStructure> {
        self.outline
            .clone()
            .ok_or_else(|| LlmError::parse("model returned prose"))
    }
}
