//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub youtube: CheckStatus,
    pub llm: CheckStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckStatus {
    fn configured(ok: bool, missing: &str) -> Self {
        if ok {
            Self {
                status: "ok".to_string(),
                error: None,
            }
        } else {
            Self {
                status: "missing".to_string(),
                error: Some(missing.to_string()),
            }
        }
    }
}

/// Readiness check endpoint (readiness probe).
///
/// Without YouTube credentials nothing can be served. Without model
/// credentials runs still succeed through the flat search, so the service
/// reports `degraded` but stays ready.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let credentials = state.credentials;

    let status = match (credentials.youtube, credentials.llm) {
        (true, true) => "ready",
        (true, false) => "degraded",
        (false, _) => "unavailable",
    };

    let response = ReadinessResponse {
        status: status.to_string(),
        checks: ReadinessChecks {
            youtube: CheckStatus::configured(credentials.youtube, "YOUTUBE_API_KEY not set"),
            llm: CheckStatus::configured(
                credentials.llm,
                "OPENAI_API_KEY not set; course outlines disabled",
            ),
        },
    };

    if credentials.youtube {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
