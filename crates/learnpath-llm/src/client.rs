//! Chat-completion client for course outline generation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn, Instrument};

use learnpath_models::{CourseStructure, LearningPurpose};

use crate::config::LlmConfig;
use crate::error::{LlmError, LlmResult};
use crate::extract::parse_course_structure;
use crate::metrics::record_request;
use crate::prompt::{build_course_prompt, SYSTEM_PROMPT};

/// Produces an ordered course outline for a topic.
#[async_trait]
pub trait CourseGenerator: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        purpose: LearningPurpose,
        intent: Option<&str>,
    ) -> LlmResult<CourseStructure>;
}

/// Chat-completion request.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Chat-completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// OpenAI-compatible chat-completion client.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    config: LlmConfig,
}

impl OpenAiClient {
    /// Create a new client. A missing API key is allowed; calls then fail
    /// with [`LlmError::NotConfigured`].
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("learnpath-llm/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if !config.is_configured() {
            warn!("OPENAI_API_KEY not set; course outlines will not be generated");
        }

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        Self::new(LlmConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Send one chat-completion request and return the raw message text.
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::NotConfigured)?;
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| "Failed to generate course structure".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::parse(format!("unreadable completion response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl CourseGenerator for OpenAiClient {
    async fn generate(
        &self,
        topic: &str,
        purpose: LearningPurpose,
        intent: Option<&str>,
    ) -> LlmResult<CourseStructure> {
        let span = info_span!("course_generation", topic = %topic, purpose = %purpose);

        async {
            let prompt = build_course_prompt(topic, purpose, intent);
            let start = Instant::now();

            let result = match self.complete(&prompt).await {
                Ok(text) => {
                    debug!(chars = text.len(), "Completion received");
                    parse_course_structure(&text)
                }
                Err(e) => Err(e),
            };

            let latency_ms = start.elapsed().as_millis() as f64;
            let status = match &result {
                Ok(_) => "ok",
                Err(e) => e.kind(),
            };
            record_request(&self.config.model, status, latency_ms);

            if let Ok(structure) = &result {
                info!(
                    title = %structure.title,
                    sub_topics = structure.video_sequence.len(),
                    latency_ms = latency_ms,
                    "Course structure generated"
                );
            }

            result
        }
        .instrument(span)
        .await
    }
}

fn map_send_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(e.to_string())
    } else {
        LlmError::Network(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> LlmConfig {
        LlmConfig {
            api_key: Some("sk-test".to_string()),
            base_url: server.uri(),
            ..LlmConfig::default()
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    const OUTLINE: &str = r#"{"title":"Hooks","description":"D","learningObjectives":["a"],
        "videoSequence":[{"order":1,"title":"useState","description":"x","searchKeywords":["useState"]}]}"#;

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 2000,
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(OUTLINE)))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(config_for(&server)).unwrap();
        let structure = client
            .generate("React Hooks", LearningPurpose::Steps, None)
            .await
            .unwrap();

        assert_eq!(structure.title, "Hooks");
        assert_eq!(structure.video_sequence[0].search_keywords, vec!["useState"]);
    }

    #[tokio::test]
    async fn test_generate_handles_fenced_output() {
        let server = MockServer::start().await;
        let fenced = format!("```json\n{}\n```", OUTLINE);
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(&fenced)))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(config_for(&server)).unwrap();
        assert!(client
            .generate("React Hooks", LearningPurpose::Overview, Some("interviews"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_generate_api_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(config_for(&server)).unwrap();
        let err = client
            .generate("Rust", LearningPurpose::Steps, None)
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(config_for(&server)).unwrap();
        let err = client
            .generate("Rust", LearningPurpose::Steps, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_unparseable_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("Sorry, I can't do that.")),
            )
            .mount(&server)
            .await;

        let client = OpenAiClient::new(config_for(&server)).unwrap();
        let err = client
            .generate("Rust", LearningPurpose::Steps, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_generate_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(OUTLINE))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = LlmConfig {
            timeout: Duration::from_millis(100),
            ..config_for(&server)
        };
        let client = OpenAiClient::new(config).unwrap();
        let err = client
            .generate("Rust", LearningPurpose::Steps, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_generate_without_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(OUTLINE)))
            .expect(0)
            .mount(&server)
            .await;

        let config = LlmConfig {
            api_key: None,
            ..config_for(&server)
        };
        let client = OpenAiClient::new(config).unwrap();
        assert!(!client.is_configured());

        let err = client
            .generate("Rust", LearningPurpose::Steps, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }
}
