//! Course outline generation.
//!
//! This crate provides:
//! - An OpenAI-compatible chat-completion client
//! - Prompt construction per learning purpose
//! - Tolerant JSON extraction from model output
//! - The `CourseGenerator` seam used by the curation pipeline

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod prompt;

pub use client::{CourseGenerator, OpenAiClient};
pub use config::LlmConfig;
pub use error::{LlmError, LlmResult};
pub use extract::{extract_json_object, parse_course_structure};
