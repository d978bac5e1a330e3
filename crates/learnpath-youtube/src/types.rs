//! YouTube Data API v3 wire types.

use serde::Deserialize;

use learnpath_models::{SearchResult, VideoDetails};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
}

impl ApiErrorBody {
    /// Machine-readable reason of the first error, falling back to the message.
    pub fn first_reason(&self) -> Option<&str> {
        self.errors
            .first()
            .and_then(|e| e.reason.as_deref())
            .or(self.message.as_deref())
    }
}

// =============================================================================
// search.list
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl Thumbnails {
    /// Best available thumbnail URL, preferring high resolution.
    pub fn best_url(&self) -> String {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

impl SearchItem {
    /// Convert to a search result. Items that are not videos yield `None`.
    pub fn into_result(self) -> Option<SearchResult> {
        let video_id = self.id.video_id.filter(|id| !id.is_empty())?;
        let snippet = self.snippet.unwrap_or_default();

        Some(SearchResult {
            video_id,
            title: snippet.title,
            channel_name: snippet.channel_title,
            thumbnail_url: snippet.thumbnails.best_url(),
            published_at: snippet.published_at,
            description: snippet.description,
        })
    }
}

// =============================================================================
// videos.list
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    pub duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Counts are strings on the wire; absent when the owner hides them
    #[serde(default)]
    pub view_count: Option<String>,
}

impl VideoItem {
    /// Convert to details. Items without a duration are not scorable.
    pub fn into_details(self) -> Option<(String, VideoDetails)> {
        let duration_code = self.content_details?.duration;
        let view_count = self
            .statistics
            .and_then(|s| s.view_count)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Some((
            self.id,
            VideoDetails {
                duration_code,
                view_count,
            },
        ))
    }
}
