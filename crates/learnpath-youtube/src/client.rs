//! YouTube Data API v3 client.
//!
//! Thin client with:
//! - HTTP client tuning (pooling, timeouts)
//! - Reason-aware error classification
//! - Observability (tracing spans, metrics)

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info_span, Instrument};

use learnpath_models::{SearchResult, VideoDetails};

use crate::config::YouTubeConfig;
use crate::error::{YouTubeError, YouTubeResult};
use crate::metrics::record_request;
use crate::types::{SearchListResponse, VideoListResponse};

/// Maximum ids accepted by one `videos.list` call.
pub const MAX_IDS_PER_LOOKUP: usize = 50;

/// Keyword search and metadata lookup against a video platform.
///
/// The curation pipeline only depends on this trait, so tests can swap in
/// in-memory fakes.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for videos matching `query`, biased towards `language`.
    async fn search_videos(
        &self,
        query: &str,
        language: &str,
        max_results: u32,
    ) -> YouTubeResult<Vec<SearchResult>>;

    /// Look up duration and view count for the given ids.
    ///
    /// Ids the platform does not return are absent from the map.
    async fn fetch_details(&self, ids: &[String]) -> YouTubeResult<HashMap<String, VideoDetails>>;
}

/// YouTube Data API client.
#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    /// Create a new YouTube client.
    pub fn new(config: YouTubeConfig) -> YouTubeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("learnpath-youtube/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(YouTubeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> YouTubeResult<Self> {
        Self::new(YouTubeConfig::from_env()?)
    }

    pub fn config(&self) -> &YouTubeConfig {
        &self.config
    }

    async fn search_inner(
        &self,
        query: &str,
        language: &str,
        max_results: u32,
    ) -> YouTubeResult<Vec<SearchResult>> {
        let url = format!("{}/search", self.config.base_url);
        let max_results = max_results.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("relevanceLanguage", language),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_send_error)?;

        if !status.is_success() {
            return Err(YouTubeError::from_http_status(status.as_u16(), &body));
        }

        let parsed: SearchListResponse = serde_json::from_str(&body)
            .map_err(|e| YouTubeError::invalid_response(format!("search.list: {}", e)))?;

        // The API occasionally reports failures inside a 200 body
        if let Some(error) = parsed.error {
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: error
                    .message
                    .unwrap_or_else(|| "Failed to search YouTube".to_string()),
            });
        }

        let results: Vec<SearchResult> = parsed
            .items
            .into_iter()
            .filter_map(|item| item.into_result())
            .collect();

        debug!(query = %query, count = results.len(), "YouTube search returned");
        Ok(results)
    }

    async fn details_chunk(&self, ids: &[String]) -> YouTubeResult<Vec<(String, VideoDetails)>> {
        let url = format!("{}/videos", self.config.base_url);
        let joined = ids.join(",");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "contentDetails,statistics"),
                ("id", joined.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_send_error)?;

        if !status.is_success() {
            return Err(YouTubeError::from_http_status(status.as_u16(), &body));
        }

        let parsed: VideoListResponse = serde_json::from_str(&body)
            .map_err(|e| YouTubeError::invalid_response(format!("videos.list: {}", e)))?;

        Ok(parsed
            .items
            .into_iter()
            .filter_map(|item| item.into_details())
            .collect())
    }

    /// Execute a request with tracing span and metrics.
    async fn execute_request<T, F>(&self, operation: &str, fut: F) -> YouTubeResult<T>
    where
        F: std::future::Future<Output = YouTubeResult<T>>,
    {
        let span = info_span!("youtube_request", operation = %operation);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, status, latency_ms);

        result
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_videos(
        &self,
        query: &str,
        language: &str,
        max_results: u32,
    ) -> YouTubeResult<Vec<SearchResult>> {
        self.execute_request("search", self.search_inner(query, language, max_results))
            .await
    }

    async fn fetch_details(&self, ids: &[String]) -> YouTubeResult<HashMap<String, VideoDetails>> {
        let mut details = HashMap::with_capacity(ids.len());
        if ids.is_empty() {
            return Ok(details);
        }

        for chunk in ids.chunks(MAX_IDS_PER_LOOKUP) {
            let items = self
                .execute_request("videos", self.details_chunk(chunk))
                .await?;
            details.extend(items);
        }

        debug!(requested = ids.len(), found = details.len(), "YouTube details fetched");
        Ok(details)
    }
}

fn map_send_error(e: reqwest::Error) -> YouTubeError {
    if e.is_timeout() {
        YouTubeError::Timeout(e.to_string())
    } else {
        YouTubeError::Network(e)
    }
}
