//! Course structure extraction from raw model output.
//!
//! Models asked for "JSON only" still wrap the object in code fences or a
//! sentence of prose now and then, so the object is located before parsing.

use learnpath_models::CourseStructure;

use crate::error::{LlmError, LlmResult};

/// Locate the JSON object inside `text`.
///
/// A fence is only stripped when it wraps the whole reply; backticks inside
/// string values are left alone. The result is then narrowed to the span
/// from the first `{` to the last `}`. Returns the trimmed input when no
/// braces are found so the parser reports the real problem.
pub fn extract_json_object(text: &str) -> &str {
    let text = text.trim();

    let body = match text.strip_prefix("```") {
        Some(rest) => rest.strip_suffix("```").unwrap_or(rest),
        None => text,
    };

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if end > start => &body[start..=end],
        _ => body.trim(),
    }
}

/// Parse a course structure out of raw model output.
///
/// Fails when no object can be parsed or the outline has no sub-topics.
/// Missing orders are filled with their 1-based position.
pub fn parse_course_structure(text: &str) -> LlmResult<CourseStructure> {
    let json = extract_json_object(text);

    let mut structure: CourseStructure = serde_json::from_str(json)
        .map_err(|e| LlmError::parse(format!("invalid course JSON: {}", e)))?;

    if structure.video_sequence.is_empty() {
        return Err(LlmError::parse("course structure has no videoSequence entries"));
    }

    structure.normalize_orders();
    Ok(structure)
}
