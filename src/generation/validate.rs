//! Acceptance checks for candidate questions.
//!
//! Candidates that fail a check are dropped from the batch; a bad question
//! never aborts the whole generation.

use serde_json::Value;
use uuid::Uuid;

use crate::GenerationError;
use crate::models::QuizQuestion;

const OPTION_COUNT: usize = 4;

/// Whether a candidate object has the exact shape of a question.
pub fn validate_candidate(candidate: &Value) -> bool {
    let Some(object) = candidate.as_object() else {
        return false;
    };

    let options_ok = object
        .get("options")
        .and_then(Value::as_array)
        .is_some_and(|options| {
            options.len() == OPTION_COUNT && options.iter().all(Value::is_string)
        });

    let answer_ok = object
        .get("correctAnswer")
        .and_then(Value::as_u64)
        .is_some_and(|index| index < OPTION_COUNT as u64);

    options_ok
        && answer_ok
        && object.get("question").is_some_and(Value::is_string)
        && object.get("explanation").is_some_and(Value::is_string)
        && object.get("difficulty").is_some_and(Value::is_string)
        && object.get("topic").is_some_and(Value::is_string)
}

/// Turn an accepted candidate into a domain question with a fresh id.
///
/// Returns `None` when the candidate fails validation.
pub fn normalize_candidate(candidate: &Value) -> Option<QuizQuestion> {
    if !validate_candidate(candidate) {
        return None;
    }

    let raw_options = candidate.get("options")?.as_array()?;
    let mut options = <[String; 4]>::default();
    for (slot, value) in options.iter_mut().zip(raw_options) {
        *slot = value.as_str()?.to_string();
    }

    let index = candidate.get("correctAnswer")?.as_u64()? as usize;

    Some(QuizQuestion {
        id: Uuid::new_v4(),
        question: candidate.get("question")?.as_str()?.to_string(),
        options,
        // validate_candidate already bounds the index; the clamp stays as a
        // final safety net.
        correct_answer: index.min(OPTION_COUNT - 1),
        explanation: candidate.get("explanation")?.as_str()?.to_string(),
        difficulty: candidate.get("difficulty")?.as_str()?.to_string(),
        topic: candidate.get("topic")?.as_str()?.to_string(),
    })
}

/// Extract and validate the question batch from the generator's reply.
///
/// `raw` must be the `{"questions": [...]}` envelope. Invalid candidates
/// are dropped, survivors are capped at `count`, and zero survivors is an
/// error — an empty batch is never a success.
pub fn collect_questions(raw: &Value, count: usize) -> Result<Vec<QuizQuestion>, GenerationError> {
    let candidates = raw
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(GenerationError::InvalidResponse)?;

    let mut questions: Vec<QuizQuestion> =
        candidates.iter().filter_map(normalize_candidate).collect();

    let dropped = candidates.len() - questions.len();
    if dropped > 0 {
        log::debug!("dropped {dropped} invalid candidate questions");
    }

    if questions.is_empty() {
        return Err(GenerationError::NoValidQuestions);
    }

    questions.truncate(count);
    Ok(questions)
}
