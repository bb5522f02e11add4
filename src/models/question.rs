use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single multiple-choice question produced by the generator.
///
/// Serialized in camelCase, the shape the endpoint promises. The
/// `difficulty` string is whatever the generator reported; the request-side
/// `misto` value is never stored on a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: [String; 4],
    /// Index into `options`, always in 0..=3 for accepted questions.
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: String,
    pub topic: String,
}
