//! Learner preference models.
//!
//! Purpose and duration bucket are closed enums so every consumer matches on
//! them exhaustively.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted topic length (characters).
pub const MAX_TOPIC_LENGTH: usize = 200;

/// Maximum accepted intent length (characters).
pub const MAX_INTENT_LENGTH: usize = 1000;

/// How the learner wants the material presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LearningPurpose {
    #[serde(rename = "overview")]
    Overview,
    #[serde(rename = "steps")]
    Steps,
    #[serde(rename = "project-based")]
    ProjectBased,
}

impl LearningPurpose {
    /// Every purpose, in display order.
    pub const ALL: &'static [LearningPurpose] = &[
        LearningPurpose::Overview,
        LearningPurpose::Steps,
        LearningPurpose::ProjectBased,
    ];

    /// Wire value, also used inside search queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningPurpose::Overview => "overview",
            LearningPurpose::Steps => "steps",
            LearningPurpose::ProjectBased => "project-based",
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            LearningPurpose::Overview => "Overview",
            LearningPurpose::Steps => "Step-by-Step",
            LearningPurpose::ProjectBased => "Project-Based",
        }
    }

    /// One-line description shown next to the label.
    pub fn description(&self) -> &'static str {
        match self {
            LearningPurpose::Overview => {
                "Get a comprehensive introduction and understand the big picture"
            }
            LearningPurpose::Steps => "Learn through clear, sequential tutorials and guides",
            LearningPurpose::ProjectBased => "Build something practical while learning hands-on",
        }
    }

    /// Keywords that indicate a video fits this purpose.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            LearningPurpose::Overview => &[
                "introduction",
                "overview",
                "basics",
                "fundamentals",
                "what is",
                "explained",
                "guide",
                "tutorial",
            ],
            LearningPurpose::Steps => &[
                "step by step",
                "tutorial",
                "how to",
                "guide",
                "walkthrough",
                "learn",
                "complete course",
            ],
            LearningPurpose::ProjectBased => &[
                "project",
                "build",
                "create",
                "hands-on",
                "practical",
                "tutorial",
                "full project",
                "real world",
            ],
        }
    }
}

impl fmt::Display for LearningPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minute range a course should fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationRange {
    pub min: f64,
    /// `f64::INFINITY` for the open-ended bucket.
    pub max: f64,
}

impl DurationRange {
    /// Whether the range has a finite upper bound.
    pub fn is_bounded(&self) -> bool {
        self.max.is_finite()
    }

    /// Hard ceiling for accumulated minutes (20% over the nominal max).
    pub fn ceiling(&self) -> f64 {
        if self.is_bounded() {
            self.max * 1.2
        } else {
            f64::INFINITY
        }
    }

    pub fn contains(&self, minutes: f64) -> bool {
        minutes >= self.min && minutes <= self.max
    }
}

/// When greedy playlist assembly may stop early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoppingRule {
    /// Stop once the total has reached both `min` and `near_max`.
    Window { min: f64, near_max: f64 },
    /// Stop once both a video count and a minute floor are reached.
    Volume { min_videos: usize, min_minutes: f64 },
}

impl StoppingRule {
    pub fn should_stop(&self, selected: usize, total_minutes: f64) -> bool {
        match *self {
            StoppingRule::Window { min, near_max } => {
                total_minutes >= min && total_minutes >= near_max
            }
            StoppingRule::Volume {
                min_videos,
                min_minutes,
            } => selected >= min_videos && total_minutes >= min_minutes,
        }
    }
}

/// Coarse course length chosen by the learner, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DurationBucket {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "2-5")]
    TwoToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl DurationBucket {
    /// Every bucket, shortest first.
    pub const ALL: &'static [DurationBucket] = &[
        DurationBucket::OneToTwo,
        DurationBucket::TwoToFive,
        DurationBucket::FiveToTen,
        DurationBucket::TenPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::OneToTwo => "1-2",
            DurationBucket::TwoToFive => "2-5",
            DurationBucket::FiveToTen => "5-10",
            DurationBucket::TenPlus => "10+",
        }
    }

    /// Target range in minutes.
    pub fn range(&self) -> DurationRange {
        match self {
            DurationBucket::OneToTwo => DurationRange { min: 60.0, max: 120.0 },
            DurationBucket::TwoToFive => DurationRange { min: 120.0, max: 300.0 },
            DurationBucket::FiveToTen => DurationRange { min: 300.0, max: 600.0 },
            DurationBucket::TenPlus => DurationRange {
                min: 600.0,
                max: f64::INFINITY,
            },
        }
    }

    /// Early-stop predicate used during greedy assembly.
    pub fn stopping_rule(&self) -> StoppingRule {
        let range = self.range();
        match self {
            DurationBucket::OneToTwo | DurationBucket::TwoToFive | DurationBucket::FiveToTen => {
                StoppingRule::Window {
                    min: range.min,
                    near_max: range.max * 0.8,
                }
            }
            DurationBucket::TenPlus => StoppingRule::Volume {
                min_videos: 12,
                min_minutes: range.min,
            },
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to a curation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningPreferences {
    /// Free-text topic, e.g. "React Hooks"
    pub topic: String,

    pub learning_purpose: LearningPurpose,

    pub duration: DurationBucket,

    /// Locale code used for search relevance
    #[serde(default = "default_language")]
    pub language: String,

    /// Optional refinement of what the learner wants to achieve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

impl LearningPreferences {
    /// Validate the preferences.
    pub fn validate(&self) -> Result<(), String> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err("Topic is required".to_string());
        }

        if topic.chars().count() > MAX_TOPIC_LENGTH {
            return Err(format!(
                "Topic must be at most {} characters",
                MAX_TOPIC_LENGTH
            ));
        }

        if let Some(intent) = &self.intent {
            if intent.chars().count() > MAX_INTENT_LENGTH {
                return Err(format!(
                    "Intent must be at most {} characters",
                    MAX_INTENT_LENGTH
                ));
            }
        }

        if self.language.trim().is_empty() {
            return Err("Language is required".to_string());
        }

        Ok(())
    }

    /// Intent with surrounding whitespace removed, `None` when blank.
    pub fn intent(&self) -> Option<&str> {
        self.intent
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
