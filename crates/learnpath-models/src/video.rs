//! Video candidate and playlist models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::course::CourseSummary;
use crate::duration::{format_duration, format_view_count};

/// Order bucket shared by every flat-search candidate.
pub const FLAT_SEARCH_ORDER: u32 = 0;

/// A video returned by a platform search, before metadata lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    /// RFC 3339 timestamp as reported by the platform
    pub published_at: String,
    pub description: String,
}

impl SearchResult {
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Per-video metadata from the batched lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    /// Platform duration code, e.g. `PT1H2M3S`
    pub duration_code: String,
    pub view_count: u64,
}

/// Sub-topic a candidate was found for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicTag {
    pub title: String,
    pub order: u32,
}

/// A search result tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub video: SearchResult,
    /// `None` for flat-search results
    pub sub_topic: Option<TopicTag>,
}

impl Candidate {
    pub fn tagged(video: SearchResult, title: impl Into<String>, order: u32) -> Self {
        Self {
            video,
            sub_topic: Some(TopicTag {
                title: title.into(),
                order,
            }),
        }
    }

    pub fn untagged(video: SearchResult) -> Self {
        Self {
            video,
            sub_topic: None,
        }
    }

    pub fn course_order(&self) -> u32 {
        self.sub_topic
            .as_ref()
            .map(|t| t.order)
            .unwrap_or(FLAT_SEARCH_ORDER)
    }
}

/// A candidate with metadata, score and course position attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredVideo {
    pub video: SearchResult,
    pub details: VideoDetails,
    pub duration_minutes: f64,
    /// 0–100
    pub learning_score: u8,
    /// At most four, most significant first
    pub reasons: Vec<String>,
    pub course_order: u32,
    pub course_topic: String,
}

impl ScoredVideo {
    /// Strip internal fields and format for the caller.
    pub fn to_public(&self) -> Video {
        Video {
            id: self.video.video_id.clone(),
            title: self.video.title.clone(),
            channel_name: self.video.channel_name.clone(),
            thumbnail_url: self.video.thumbnail_url.clone(),
            duration: format_duration(&self.details.duration_code),
            view_count: format_view_count(self.details.view_count),
            published_at: self.video.published_at.clone(),
            description: self.video.description.clone(),
            url: self.video.watch_url(),
            learning_score: self.learning_score,
            reasons: self.reasons.clone(),
        }
    }
}

/// A playlist entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    /// `H:MM:SS` or `M:SS`
    pub duration: String,
    /// e.g. `1.5K views`
    pub view_count: String,
    pub published_at: String,
    pub description: String,
    pub url: String,
    pub learning_score: u8,
    pub reasons: Vec<String>,
}

/// Successful curation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub videos: Vec<Video>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_structure: Option<CourseSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> SearchResult {
        SearchResult {
            video_id: "abc123".into(),
            title: "Rust in 100 seconds".into(),
            channel_name: "Fireship".into(),
            thumbnail_url: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".into(),
            published_at: "2024-03-01T12:00:00Z".into(),
            description: "Learn Rust".into(),
        }
    }

    #[test]
    fn test_published_at_parses_rfc3339() {
        assert!(result().published_at_utc().is_some());

        let mut bad = result();
        bad.published_at = "yesterday".into();
        assert!(bad.published_at_utc().is_none());
    }

    #[test]
    fn test_flat_candidate_uses_flat_order() {
        assert_eq!(Candidate::untagged(result()).course_order(), FLAT_SEARCH_ORDER);
        assert_eq!(Candidate::tagged(result(), "Basics", 3).course_order(), 3);
    }

    #[test]
    fn test_public_video_formats_fields() {
        let scored = ScoredVideo {
            video: result(),
            details: VideoDetails {
                duration_code: "PT1H2M3S".into(),
                view_count: 1_500,
            },
            duration_minutes: 62.05,
            learning_score: 77,
            reasons: vec!["Good length".into()],
            course_order: 1,
            course_topic: "Basics".into(),
        };

        let public = scored.to_public();
        assert_eq!(public.duration, "1:02:03");
        assert_eq!(public.view_count, "1.5K views");
        assert_eq!(public.url, "https://www.youtube.com/watch?v=abc123");

        let value = serde_json::to_value(&public).unwrap();
        assert_eq!(value["channelName"], "Fireship");
        assert_eq!(value["learningScore"], 77);
        assert!(value.get("courseOrder").is_none());
    }

    #[test]
    fn test_playlist_omits_missing_structure() {
        let response = PlaylistResponse {
            videos: vec![],
            course_structure: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("courseStructure").is_none());
    }
}
