//! Client for the external chat-completions API.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::GenerationError;

/// Upstream calls that take longer than this fail instead of hanging the
/// original request.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "Você é um gerador de quizzes de múltipla escolha. \
Responda sempre com um único objeto JSON válido, sem comentários nem markdown.";

/// Connection details for the completion API, read from the environment.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl UpstreamConfig {
    /// Read the configuration from the environment (`.env` friendly).
    ///
    /// `QUIZGEN_API_KEY` is required; the URL and model have defaults for
    /// the OpenAI completions endpoint.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var("QUIZGEN_API_KEY")
            .map_err(|_| GenerationError::MissingConfig("QUIZGEN_API_KEY"))?;
        let api_url =
            env::var("QUIZGEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = env::var("QUIZGEN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_url,
            api_key,
            model,
        })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: Value,
    temperature: f32,
}

/// One reqwest client with the fixed upstream timeout baked in.
pub struct CompletionClient {
    http: Client,
    config: UpstreamConfig,
}

impl CompletionClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(GenerationError::Request)?;

        Ok(Self { http, config })
    }

    /// Send `prompt` and return the completion content parsed as JSON.
    ///
    /// The request asks for structured JSON output directly
    /// (`response_format: json_object`), so the content either parses or
    /// the whole call fails; there is no partial recovery.
    pub async fn complete_json(&self, prompt: &str) -> Result<Value, GenerationError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: serde_json::json!({ "type": "json_object" }),
            temperature: 0.8,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Upstream(
                        "tempo limite excedido na chamada ao modelo".to_string(),
                    )
                } else if e.is_connect() {
                    GenerationError::Upstream(format!("falha de conexão com o modelo: {e}"))
                } else {
                    GenerationError::Upstream(format!("falha na chamada ao modelo: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream(format!(
                "o modelo respondeu {status}: {body}"
            )));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|_| GenerationError::InvalidResponse)?;

        let content = envelope
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .ok_or(GenerationError::InvalidResponse)?;

        serde_json::from_str(content).map_err(|_| GenerationError::InvalidResponse)
    }
}
