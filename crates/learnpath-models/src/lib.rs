//! Shared data models for the LearnPath backend.
//!
//! This crate provides Serde-serializable types for:
//! - Learner preferences (purpose, duration bucket)
//! - Generated course outlines
//! - Search candidates, scored videos and playlists
//! - Duration code decoding and display formatting

pub mod course;
pub mod duration;
pub mod preferences;
pub mod video;

// Re-export common types
pub use course::{CourseStructure, CourseSummary, SubTopic};
pub use duration::{decode_duration, format_duration, format_view_count, DurationParts};
pub use preferences::{
    DurationBucket, DurationRange, LearningPreferences, LearningPurpose, StoppingRule,
};
pub use video::{
    Candidate, PlaylistResponse, ScoredVideo, SearchResult, TopicTag, Video, VideoDetails,
    FLAT_SEARCH_ORDER,
};
