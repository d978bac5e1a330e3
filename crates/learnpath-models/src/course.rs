//! Generated course outline models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One ordered unit of a course outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    /// 1-based position in the sequence (0 when the generator omitted it)
    #[serde(default)]
    pub order: u32,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Keywords appended to the search query for this sub-topic
    #[serde(default)]
    pub search_keywords: Vec<String>,
}

/// Course outline produced by the structure generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseStructure {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub learning_objectives: Vec<String>,

    #[serde(default)]
    pub video_sequence: Vec<SubTopic>,
}

impl CourseStructure {
    /// Fill in missing orders with the 1-based position.
    ///
    /// Orders the generator did supply are kept as-is, duplicates included.
    pub fn normalize_orders(&mut self) {
        for (idx, sub_topic) in self.video_sequence.iter_mut().enumerate() {
            if sub_topic.order == 0 {
                sub_topic.order = idx as u32 + 1;
            }
        }
    }

    /// The part of the outline echoed back to callers.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            title: self.title.clone(),
            description: self.description.clone(),
            learning_objectives: self.learning_objectives.clone(),
        }
    }
}

/// Course title, description and objectives returned with a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_generator_shape() {
        let json = r#"{
            "title": "Mastering React Hooks",
            "description": "From useState to custom hooks.",
            "learningObjectives": ["Use state", "Use effects", "Write custom hooks"],
            "videoSequence": [
                {"order": 1, "title": "useState", "description": "State basics",
                 "searchKeywords": ["useState", "react state"]},
                {"title": "useEffect", "searchKeywords": ["useEffect"]}
            ]
        }"#;
        let mut course: CourseStructure = serde_json::from_str(json).unwrap();
        course.normalize_orders();

        assert_eq!(course.video_sequence.len(), 2);
        assert_eq!(course.video_sequence[0].order, 1);
        assert_eq!(course.video_sequence[1].order, 2);
        assert_eq!(course.video_sequence[1].description, "");
    }

    #[test]
    fn test_normalize_keeps_duplicate_orders() {
        let mut course = CourseStructure {
            title: "t".into(),
            description: String::new(),
            learning_objectives: vec![],
            video_sequence: vec![
                SubTopic { order: 2, title: "a".into(), description: String::new(), search_keywords: vec![] },
                SubTopic { order: 2, title: "b".into(), description: String::new(), search_keywords: vec![] },
            ],
        };
        course.normalize_orders();
        assert_eq!(course.video_sequence[0].order, 2);
        assert_eq!(course.video_sequence[1].order, 2);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let course = CourseStructure {
            title: "Rust".into(),
            description: "Systems programming".into(),
            learning_objectives: vec!["Ownership".into()],
            video_sequence: vec![],
        };
        let value = serde_json::to_value(course.summary()).unwrap();
        assert_eq!(value["learningObjectives"][0], "Ownership");
        assert!(value.get("videoSequence").is_none());
    }
}
