//! Playlist search handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use tracing::{error, info};
use uuid::Uuid;

use learnpath_models::{LearningPreferences, PlaylistResponse};

use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestId;
use crate::security::sanitize_preferences;
use crate::state::AppState;

/// Curate a playlist for the posted learner preferences.
pub async fn search_playlist(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    body: Result<Json<LearningPreferences>, JsonRejection>,
) -> ApiResult<Json<PlaylistResponse>> {
    let Json(preferences) =
        body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let preferences = sanitize_preferences(preferences).map_err(ApiError::BadRequest)?;

    let request_id = request_id
        .map(|Extension(id)| id.0)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!(
        request_id = %request_id,
        topic = %preferences.topic,
        purpose = %preferences.learning_purpose,
        duration = %preferences.duration,
        "Playlist requested"
    );

    // A panic inside the run must not take the connection down with it
    let pipeline = state.pipeline.clone();
    let run_id = request_id.clone();
    let response = tokio::spawn(async move { pipeline.curate(&preferences, &run_id).await })
        .await
        .map_err(|e| {
            error!(request_id = %request_id, error = %e, "Curation task aborted");
            ApiError::internal(format!("curation task aborted: {}", e))
        })??;

    Ok(Json(response))
}
