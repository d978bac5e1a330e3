//! YouTube client error types.

use thiserror::Error;

use crate::types::ApiErrorEnvelope;

/// Result type for YouTube operations.
pub type YouTubeResult<T> = Result<T, YouTubeError>;

/// Errors that can occur while talking to the YouTube Data API.
///
/// Display strings are user-facing: they tell the learner whether to retry,
/// pick another topic, or have the operator fix configuration.
#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("YouTube API request timed out: {0}")]
    Timeout(String),

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Coarse failure family used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Credential missing, invalid, expired or lacking permission
    Auth,
    /// Daily quota or rate limit exhausted
    Quota,
    /// Timeouts, 5xx, malformed responses and anything unclassified
    Transient,
}

impl YouTubeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Classify a non-success HTTP response.
    ///
    /// 403 and 503 consult the provider reason code before choosing a
    /// message, since both statuses are used for quota exhaustion.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
        let reason = envelope
            .as_ref()
            .and_then(|e| e.error.first_reason())
            .unwrap_or("unknown")
            .to_string();
        let provider_message = envelope
            .as_ref()
            .and_then(|e| e.error.message.clone())
            .filter(|m| !m.is_empty());

        match status {
            403 => {
                if is_quota_reason(&reason) {
                    Self::QuotaExceeded(
                        "YouTube API quota exceeded. Please check your API quota or try again later."
                            .to_string(),
                    )
                } else if is_key_reason(&reason) {
                    Self::InvalidCredentials(
                        "YouTube API key is invalid or expired. Please check your API key configuration."
                            .to_string(),
                    )
                } else {
                    Self::AccessDenied(
                        "YouTube API access denied. Please check your API key and permissions."
                            .to_string(),
                    )
                }
            }
            400 if is_key_reason(&reason) => Self::InvalidCredentials(
                "YouTube API key is invalid or expired. Please check your API key configuration."
                    .to_string(),
            ),
            429 => Self::RateLimited(
                "YouTube API rate limit exceeded. Please try again later.".to_string(),
            ),
            503 => {
                if is_quota_reason(&reason) || reason.contains("backendError") {
                    Self::QuotaExceeded(
                        "YouTube API quota exceeded or service temporarily unavailable. Please try again later."
                            .to_string(),
                    )
                } else {
                    Self::Unavailable(
                        "YouTube API service is temporarily unavailable. Please try again in a few moments."
                            .to_string(),
                    )
                }
            }
            _ => Self::Api {
                status,
                message: provider_message.unwrap_or_else(|| format!("HTTP {}", status)),
            },
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            YouTubeError::InvalidCredentials(_)
            | YouTubeError::AccessDenied(_)
            | YouTubeError::Config(_) => FailureCategory::Auth,
            YouTubeError::QuotaExceeded(_) | YouTubeError::RateLimited(_) => {
                FailureCategory::Quota
            }
            YouTubeError::Unavailable(_)
            | YouTubeError::Timeout(_)
            | YouTubeError::Api { .. }
            | YouTubeError::InvalidResponse(_)
            | YouTubeError::Network(_) => FailureCategory::Transient,
        }
    }

    /// HTTP status for metrics labels.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            YouTubeError::QuotaExceeded(_) => Some(403),
            YouTubeError::InvalidCredentials(_) | YouTubeError::AccessDenied(_) => Some(403),
            YouTubeError::RateLimited(_) => Some(429),
            YouTubeError::Unavailable(_) => Some(503),
            YouTubeError::Timeout(_) => Some(504),
            YouTubeError::Api { status, .. } => Some(*status),
            YouTubeError::Network(e) => e.status().map(|s| s.as_u16()),
            YouTubeError::InvalidResponse(_) | YouTubeError::Config(_) => None,
        }
    }
}

fn is_quota_reason(reason: &str) -> bool {
    reason.contains("quota") || reason.contains("Quota") || reason == "dailyLimitExceeded"
}

fn is_key_reason(reason: &str) -> bool {
    reason.contains("keyInvalid") || reason.contains("keyExpired")
}
