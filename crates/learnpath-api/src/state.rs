//! Application state.

use std::sync::Arc;

use anyhow::Context;

use learnpath_curation::{CurationConfig, CurationPipeline};
use learnpath_llm::OpenAiClient;
use learnpath_youtube::YouTubeClient;

use crate::config::ApiConfig;

/// Which upstream credentials were present at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub youtube: bool,
    pub llm: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: CurationPipeline,
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(config: ApiConfig, pipeline: CurationPipeline, credentials: Credentials) -> Self {
        Self {
            config,
            pipeline,
            credentials,
        }
    }

    /// Build the real upstream clients from environment variables.
    ///
    /// A missing YouTube key is an error; a missing model key only disables
    /// outline generation.
    pub fn from_env(config: ApiConfig) -> anyhow::Result<Self> {
        let youtube = YouTubeClient::from_env().context("YouTube client")?;
        let generator = OpenAiClient::from_env().context("course generator")?;
        let credentials = Credentials {
            youtube: true,
            llm: generator.is_configured(),
        };

        let pipeline = CurationPipeline::new(
            Arc::new(youtube),
            Arc::new(generator),
            CurationConfig::from_env(),
        );

        Ok(Self::new(config, pipeline, credentials))
    }
}
