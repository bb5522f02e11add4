//! Quiz generation: prompt construction, the upstream call and candidate
//! validation.

mod prompt;
mod upstream;
mod validate;

pub use prompt::build_prompt;
pub use upstream::{CompletionClient, UPSTREAM_TIMEOUT, UpstreamConfig};
pub use validate::{collect_questions, normalize_candidate, validate_candidate};

use crate::GenerationError;
use crate::models::{GenerationOptions, QuizQuestion};
use crate::protocol::{MAX_COUNT, MIN_COUNT};

/// Stateless generation service: one upstream call per request, no shared
/// state across requests.
pub struct GenerationService {
    upstream: CompletionClient,
}

impl GenerationService {
    pub fn new(config: UpstreamConfig) -> Result<Self, GenerationError> {
        Ok(Self {
            upstream: CompletionClient::new(config)?,
        })
    }

    /// Generate up to `options.count` validated questions.
    ///
    /// The handler already rejected out-of-range counts; the clamp here is
    /// a safety net, not the contract.
    pub async fn generate(
        &self,
        options: &GenerationOptions,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let count = options.count.clamp(MIN_COUNT, MAX_COUNT);
        let options = GenerationOptions {
            count,
            ..options.clone()
        };

        let prompt = build_prompt(&options);
        log::debug!(
            "requesting {count} questions (difficulty {}, {} topics)",
            options.difficulty,
            options.topics.len()
        );

        let raw = self.upstream.complete_json(&prompt).await?;
        collect_questions(&raw, count)
    }
}
