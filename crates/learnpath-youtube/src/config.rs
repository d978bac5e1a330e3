//! YouTube client configuration.

use std::time::Duration;

use crate::error::{YouTubeError, YouTubeResult};

/// Default Data API base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube client configuration.
#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    /// Data API key
    pub api_key: String,
    /// API base URL (overridable for tests and proxies)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl YouTubeConfig {
    /// Config with default endpoints and timeouts for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Point the client at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create config from environment variables.
    pub fn from_env() -> YouTubeResult<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .or_else(|_| std::env::var("NEXT_PUBLIC_YOUTUBE_API_KEY"))
            .map_err(|_| YouTubeError::config("YOUTUBE_API_KEY must be set to search for videos"))?;

        if api_key.trim().is_empty() {
            return Err(YouTubeError::config("YOUTUBE_API_KEY cannot be empty"));
        }

        let timeout_secs: u64 = std::env::var("YOUTUBE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);

        let connect_timeout_secs: u64 = std::env::var("YOUTUBE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let base_url = std::env::var("YOUTUBE_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}
