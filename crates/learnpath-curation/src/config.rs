//! Curation pipeline configuration.

/// Pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct CurationConfig {
    /// Search results requested per sub-topic
    pub per_topic_results: u32,
    /// Search results requested by a flat search
    pub flat_results: u32,
    /// Sub-topic searches allowed in flight at once
    pub max_concurrent_searches: usize,
    /// Upper bound on returned playlist length
    pub max_playlist: usize,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            per_topic_results: 3,
            flat_results: 20,
            max_concurrent_searches: 4,
            max_playlist: 12,
        }
    }
}

impl CurationConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            per_topic_results: std::env::var("CURATION_PER_TOPIC_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.per_topic_results),
            flat_results: std::env::var("CURATION_FLAT_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.flat_results),
            max_concurrent_searches: std::env::var("CURATION_MAX_CONCURRENT_SEARCHES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_concurrent_searches),
            max_playlist: std::env::var("CURATION_MAX_PLAYLIST")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_playlist),
        }
    }
}
