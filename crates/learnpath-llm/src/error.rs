//! Course generator error types.

use thiserror::Error;

/// Result type for generator operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while generating a course outline.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenAI API key not configured")]
    NotConfigured,

    #[error("Course generation timed out: {0}")]
    Timeout(String),

    #[error("OpenAI API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("No response from OpenAI")]
    EmptyResponse,

    #[error("Failed to parse course structure: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LlmError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::NotConfigured => "not_configured",
            LlmError::Timeout(_) => "timeout",
            LlmError::Api { .. } => "api",
            LlmError::EmptyResponse => "empty_response",
            LlmError::Parse(_) => "parse",
            LlmError::Network(_) => "network",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(LlmError::NotConfigured.kind(), "not_configured");
        assert_eq!(LlmError::parse("bad").kind(), "parse");
        assert_eq!(
            LlmError::Api {
                status: 500,
                message: "boom".into()
            }
            .kind(),
            "api"
        );
    }

    #[test]
    fn test_display() {
        let err = LlmError::Api {
            status: 401,
            message: "Incorrect API key".into(),
        };
        assert_eq!(err.to_string(), "OpenAI API returned 401: Incorrect API key");
    }
}
