//! YouTube Data API client.
//!
//! This crate provides:
//! - Keyword search and batched metadata lookup
//! - Reason-aware classification of quota, credential and transient failures
//! - The `VideoSearch` seam used by the curation pipeline

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod types;


pub use client::{VideoSearch, YouTubeClient, MAX_IDS_PER_LOOKUP};
pub use config::YouTubeConfig;
pub use error::{FailureCategory, YouTubeError, YouTubeResult};
