//! Wire contract of the generation endpoint.
//!
//! Everything crossing the HTTP boundary is JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::QuizQuestion;

/// Successful response body of `POST /api/quiz/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub questions: Vec<QuizQuestion>,
}

/// Error response body, shared by 400 and 500 answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Bounds for the requested question count.
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 10;

/// Question count used when the request leaves it out.
pub const DEFAULT_COUNT: usize = 5;

/// Output language used when the request leaves it out.
pub const DEFAULT_LANGUAGE: &str = "português";

/// Topics beyond this many are dropped before prompting.
pub const MAX_TOPICS: usize = 10;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8750;

/// Wire values accepted for `difficulty`.
const DIFFICULTIES: [&str; 4] = ["fácil", "médio", "difícil", "misto"];

/// Validates a generation request body, field by field.
///
/// Checks run in a fixed order and the first failure wins; each failure
/// carries its own client-facing message. Absent fields are fine, the
/// handler fills in defaults afterwards.
pub fn validate_request(body: &Value) -> Result<(), &'static str> {
    if !body.is_object() {
        return Err("O corpo da requisição deve ser um objeto JSON");
    }

    if let Some(count) = body.get("count") {
        let in_range = count
            .as_u64()
            .is_some_and(|n| (MIN_COUNT as u64..=MAX_COUNT as u64).contains(&n));
        if !in_range {
            return Err("O número de perguntas deve ser um inteiro entre 1 e 10");
        }
    }

    if let Some(difficulty) = body.get("difficulty") {
        let known = difficulty
            .as_str()
            .is_some_and(|d| DIFFICULTIES.contains(&d));
        if !known {
            return Err("Dificuldade inválida: use fácil, médio, difícil ou misto");
        }
    }

    if let Some(topics) = body.get("topics") {
        let is_string_list = topics
            .as_array()
            .is_some_and(|list| list.iter().all(Value::is_string));
        if !is_string_list {
            return Err("O campo topics deve ser uma lista de textos");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, GenerationOptions};
    use serde_json::json;

    #[test]
    fn test_validate_count_bounds() {
        assert!(validate_request(&json!({"count": 1})).is_ok());
        assert!(validate_request(&json!({"count": 10})).is_ok());
        assert!(validate_request(&json!({"count": 0})).is_err());
        assert!(validate_request(&json!({"count": 11})).is_err());
        assert!(validate_request(&json!({"count": -3})).is_err());
        assert!(validate_request(&json!({"count": "5"})).is_err());
        assert!(validate_request(&json!({"count": 2.5})).is_err());
    }

    #[test]
    fn test_validate_difficulty() {
        for valid in ["fácil", "médio", "difícil", "misto"] {
            assert!(validate_request(&json!({"difficulty": valid})).is_ok());
        }
        assert!(validate_request(&json!({"difficulty": "extremo"})).is_err());
        assert!(validate_request(&json!({"difficulty": 2})).is_err());
    }

    #[test]
    fn test_validate_topics_must_be_string_list() {
        assert!(validate_request(&json!({"topics": ["javascript", "rust"]})).is_ok());
        assert!(validate_request(&json!({"topics": []})).is_ok());
        assert!(validate_request(&json!({"topics": "javascript"})).is_err());
        assert!(validate_request(&json!({"topics": [1, 2]})).is_err());
    }

    #[test]
    fn test_first_failing_check_wins() {
        // count is checked before difficulty
        let body = json!({"count": 0, "difficulty": "extremo"});
        let message = validate_request(&body).unwrap_err();
        assert!(message.contains("número de perguntas"));
    }

    #[test]
    fn test_empty_body_is_valid_and_defaults_apply() {
        let body = json!({});
        assert!(validate_request(&body).is_ok());

        let options: GenerationOptions = serde_json::from_value(body).unwrap();
        assert_eq!(options.count, DEFAULT_COUNT);
        assert_eq!(options.difficulty, Difficulty::Misto);
        assert!(options.topics.is_empty());
        assert_eq!(options.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_question_serializes_camel_case() {
        let question = QuizQuestion {
            id: uuid::Uuid::new_v4(),
            question: "O que o operador ? faz em Rust?".to_string(),
            options: [
                "Propaga erros".to_string(),
                "Ignora erros".to_string(),
                "Encerra o programa".to_string(),
                "Cria uma thread".to_string(),
            ],
            correct_answer: 0,
            explanation: "O operador ? propaga o erro para o chamador.".to_string(),
            difficulty: "fácil".to_string(),
            topic: "Rust".to_string(),
        };

        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"correctAnswer\":0"));
        assert!(!json.contains("correct_answer"));
    }
}
