//! Request handling for `POST /api/quiz/generate`.

use serde_json::Value;

use crate::generation::GenerationService;
use crate::models::GenerationOptions;
use crate::protocol::{GenerateResponse, MAX_COUNT, MAX_TOPICS, MIN_COUNT, validate_request};

use super::http::Response;

/// Client-facing message for any generation failure. The real cause is
/// logged, never sent.
const GENERATION_FAILED: &str = "Não foi possível gerar as perguntas. Tente novamente mais tarde.";

const MALFORMED_BODY: &str = "O corpo da requisição deve ser um objeto JSON";

/// Validate the body, run the generation and map the outcome to HTTP.
pub(super) async fn handle_generate(service: &GenerationService, body: &[u8]) -> Response {
    let options = match parse_options(body) {
        Ok(options) => options,
        Err(message) => {
            log::info!("rejected request: {message}");
            return Response::error(400, message);
        }
    };

    match service.generate(&options).await {
        Ok(questions) => {
            log::info!("generated {} questions", questions.len());
            match serde_json::to_string(&GenerateResponse { questions }) {
                Ok(body) => Response::json(200, body),
                Err(e) => {
                    log::error!("failed to serialize response: {e}");
                    Response::error(500, GENERATION_FAILED)
                }
            }
        }
        Err(e) => {
            log::error!("generation failed: {e}");
            Response::error(500, GENERATION_FAILED)
        }
    }
}

/// Parse and validate the request body into generation options.
///
/// An empty body means "all defaults". Validation order and messages come
/// from [`validate_request`]; on success the count is re-clamped and the
/// topic list truncated before the options reach the generator — the 400
/// above is the contract, the clamp is defense in depth.
pub(super) fn parse_options(body: &[u8]) -> Result<GenerationOptions, &'static str> {
    let raw: Value = if body.is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body).map_err(|_| MALFORMED_BODY)?
    };

    validate_request(&raw)?;

    let mut options: GenerationOptions =
        serde_json::from_value(raw).map_err(|_| MALFORMED_BODY)?;

    options.count = options.count.clamp(MIN_COUNT, MAX_COUNT);
    options.topics.truncate(MAX_TOPICS);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::protocol::DEFAULT_COUNT;

    #[test]
    fn test_empty_body_yields_defaults() {
        let options = parse_options(b"").unwrap();
        assert_eq!(options.count, DEFAULT_COUNT);
        assert_eq!(options.difficulty, Difficulty::Misto);
        assert!(options.topics.is_empty());
    }

    #[test]
    fn test_out_of_range_count_is_rejected_not_clamped() {
        assert!(parse_options(br#"{"count": 0}"#).is_err());
        assert!(parse_options(br#"{"count": 11}"#).is_err());
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let err = parse_options(br#"{"difficulty": "extremo"}"#).unwrap_err();
        assert!(err.contains("Dificuldade inválida"));
    }

    #[test]
    fn test_topics_must_be_an_array() {
        let err = parse_options(br#"{"topics": "javascript"}"#).unwrap_err();
        assert!(err.contains("lista de textos"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(parse_options(b"{count:").is_err());
        assert!(parse_options(b"[1, 2]").is_err());
    }

    #[test]
    fn test_excess_topics_are_dropped_silently() {
        let topics: Vec<String> = (0..12).map(|i| format!("\"topico-{i}\"")).collect();
        let body = format!(r#"{{"topics": [{}]}}"#, topics.join(", "));

        let options = parse_options(body.as_bytes()).unwrap();
        assert_eq!(options.topics.len(), MAX_TOPICS);
        assert_eq!(options.topics[0], "topico-0");
    }

    #[test]
    fn test_full_body_parses() {
        let body = r#"{"count": 3, "difficulty": "difícil", "topics": ["Rust"], "language": "english"}"#.as_bytes();
        let options = parse_options(body).unwrap();
        assert_eq!(options.count, 3);
        assert_eq!(options.difficulty, Difficulty::Dificil);
        assert_eq!(options.topics, vec!["Rust".to_string()]);
        assert_eq!(options.language, "english");
    }
}
