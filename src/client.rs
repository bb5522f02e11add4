//! Client for the generation endpoint.
//!
//! Translates chosen options into one HTTP request and hands back typed
//! questions or a displayable failure. Validation is the server's job;
//! out-of-range options are sent as-is.

use crate::GenerationError;
use crate::models::{Difficulty, GenerationOptions, QuizQuestion};
use crate::protocol::{ErrorResponse, GenerateResponse};

/// Fallback message when an error payload cannot be parsed.
const GENERIC_FAILURE: &str = "Falha ao gerar as perguntas.";

/// HTTP client for a running generation server.
pub struct QuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    /// Create a client for the server at `base_url`, e.g.
    /// `http://127.0.0.1:8750`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/quiz/generate", self.base_url.trim_end_matches('/'))
    }

    /// Request a batch of questions.
    ///
    /// Returns the server's questions as-is — the server already validated
    /// them. Every failure (transport, non-2xx, malformed payload) carries
    /// a message fit for direct display. Nothing is retried here; retry is
    /// a caller decision.
    pub async fn generate_quiz_questions(
        &self,
        options: &GenerationOptions,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(options)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| parse_error_message(&body))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(GenerationError::Server(message));
        }

        let payload: GenerateResponse = response.json().await.map_err(GenerationError::Request)?;
        Ok(payload.questions)
    }

    /// Request exactly one question about one topic.
    ///
    /// An empty result converts into an error; it never surfaces as an
    /// out-of-bounds access.
    pub async fn generate_custom_question(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<QuizQuestion, GenerationError> {
        let options = GenerationOptions {
            count: 1,
            difficulty,
            topics: vec![topic.to_string()],
            ..GenerationOptions::default()
        };

        let questions = self.generate_quiz_questions(&options).await?;
        questions.into_iter().next().ok_or_else(|| {
            GenerationError::Server("O servidor não retornou nenhuma pergunta.".to_string())
        })
    }
}

/// Pull a human-readable message out of an error payload, if there is one.
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|payload| payload.error)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_message_is_extracted() {
        let message = parse_error_message(r#"{"error": "Dificuldade inválida"}"#);
        assert_eq!(message.as_deref(), Some("Dificuldade inválida"));
    }

    #[test]
    fn test_unparseable_payload_yields_none() {
        assert!(parse_error_message("<html>502</html>").is_none());
        assert!(parse_error_message(r#"{"message": "outro formato"}"#).is_none());
        assert!(parse_error_message(r#"{"error": ""}"#).is_none());
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let client = QuizClient::new("http://localhost:8750/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:8750/api/quiz/generate"
        );
    }
}
