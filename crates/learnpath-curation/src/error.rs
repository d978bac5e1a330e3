//! Curation error types.

use thiserror::Error;

use learnpath_youtube::{FailureCategory, YouTubeError};

/// Result type for curation runs.
pub type CurationResult<T> = Result<T, CurationError>;

/// Terminal failures of a curation run.
///
/// Generation failures never appear here: the pipeline always degrades to
/// a flat search instead.
#[derive(Debug, Error)]
pub enum CurationError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UpstreamAuth(String),

    #[error("{0}")]
    UpstreamQuota(String),

    #[error("{0}")]
    UpstreamTransient(String),

    #[error("No videos found. Please check your search terms or try a different topic.")]
    EmptyResult,
}

impl CurationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP-style status for callers.
    pub fn status_code(&self) -> u16 {
        match self {
            CurationError::Validation(_) => 400,
            CurationError::UpstreamAuth(_)
            | CurationError::UpstreamQuota(_)
            | CurationError::UpstreamTransient(_) => 503,
            CurationError::EmptyResult => 404,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            CurationError::Validation(_) => "VALIDATION_ERROR",
            CurationError::UpstreamAuth(_) => "UPSTREAM_AUTH",
            CurationError::UpstreamQuota(_) => "UPSTREAM_QUOTA",
            CurationError::UpstreamTransient(_) => "UPSTREAM_UNAVAILABLE",
            CurationError::EmptyResult => "NO_RESULTS",
        }
    }
}

impl From<YouTubeError> for CurationError {
    fn from(err: YouTubeError) -> Self {
        let message = err.to_string();
        match err.category() {
            FailureCategory::Auth => CurationError::UpstreamAuth(message),
            FailureCategory::Quota => CurationError::UpstreamQuota(message),
            FailureCategory::Transient => CurationError::UpstreamTransient(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CurationError::validation("x").status_code(), 400);
        assert_eq!(CurationError::UpstreamQuota("x".into()).status_code(), 503);
        assert_eq!(CurationError::EmptyResult.status_code(), 404);
    }

    #[test]
    fn test_from_youtube_error_keeps_message() {
        let yt = YouTubeError::from_http_status(429, "");
        let expected = yt.to_string();
        let err = CurationError::from(yt);
        assert!(matches!(err, CurationError::UpstreamQuota(_)));
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_from_youtube_auth_error() {
        let err = CurationError::from(YouTubeError::config("missing key"));
        assert!(matches!(err, CurationError::UpstreamAuth(_)));
        assert_eq!(err.code(), "UPSTREAM_AUTH");
    }

    #[test]
    fn test_from_youtube_timeout() {
        let err = CurationError::from(YouTubeError::Timeout("15s".into()));
        assert!(matches!(err, CurationError::UpstreamTransient(_)));
    }
}
