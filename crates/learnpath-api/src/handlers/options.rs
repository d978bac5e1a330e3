//! Form options handler.

use axum::Json;
use serde::Serialize;

use learnpath_models::{DurationBucket, LearningPurpose};

/// One learning purpose as the request form shows it.
#[derive(Debug, Serialize)]
pub struct PurposeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// One duration bucket with its minute range.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationOption {
    pub value: &'static str,
    pub min_minutes: u32,
    /// Absent for the open-ended bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub purposes: Vec<PurposeOption>,
    pub durations: Vec<DurationOption>,
}

/// Accepted values for `learningPurpose` and `duration`.
pub async fn search_options() -> Json<OptionsResponse> {
    let purposes = LearningPurpose::ALL
        .iter()
        .map(|p| PurposeOption {
            value: p.as_str(),
            label: p.label(),
            description: p.description(),
        })
        .collect();

    let durations = DurationBucket::ALL
        .iter()
        .map(|b| {
            let range = b.range();
            DurationOption {
                value: b.as_str(),
                min_minutes: range.min as u32,
                max_minutes: range.is_bounded().then_some(range.max as u32),
            }
        })
        .collect();

    Json(OptionsResponse {
        purposes,
        durations,
    })
}
