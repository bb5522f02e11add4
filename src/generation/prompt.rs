//! Prompt template for the completion API.

use crate::models::{Difficulty, GenerationOptions};

/// Topics suggested to the generator when the request names none.
const FALLBACK_TOPICS: [&str; 6] = [
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "CSS",
    "HTTP",
];

/// Build the instructional prompt for one generation request.
///
/// The template asks for a single JSON object so the reply can be parsed
/// directly, without fishing it out of surrounding prose.
pub fn build_prompt(options: &GenerationOptions) -> String {
    let topics_clause = if options.topics.is_empty() {
        format!(
            "Varie os tópicos entre, por exemplo: {}.",
            FALLBACK_TOPICS.join(", ")
        )
    } else {
        format!(
            "Foque nos seguintes tópicos: {}.",
            options.topics.join(", ")
        )
    };

    let difficulty_clause = match options.difficulty {
        Difficulty::Misto => "Varie a dificuldade entre fácil, médio e difícil.".to_string(),
        level => format!("Todas as perguntas devem ter dificuldade \"{level}\"."),
    };

    format!(
        r#"Gere {count} perguntas de múltipla escolha sobre programação e tecnologia.
{topics_clause}
{difficulty_clause}
Escreva as perguntas em {language}.

Responda somente com um objeto JSON válido, sem nenhum texto fora dele, neste formato:
{{"questions": [{{"question": "...", "options": ["...", "...", "...", "..."], "correctAnswer": 0, "explanation": "...", "difficulty": "fácil", "topic": "..."}}]}}

Regras:
- Cada pergunta deve ter exatamente 4 opções distintas.
- "correctAnswer" é o índice da opção correta, de 0 a 3; varie esse índice entre as perguntas.
- "difficulty" deve ser "fácil", "médio" ou "difícil".
- "explanation" deve justificar a resposta correta em uma ou duas frases.
- "topic" nomeia o assunto da pergunta."#,
        count = options.count,
        language = options.language,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_count_and_language() {
        let prompt = build_prompt(&GenerationOptions::default());
        assert!(prompt.contains("Gere 5 perguntas"));
        assert!(prompt.contains("Escreva as perguntas em português."));
    }

    #[test]
    fn test_requested_topics_are_listed() {
        let options = GenerationOptions {
            topics: vec!["Rust".to_string(), "HTTP".to_string()],
            ..GenerationOptions::default()
        };
        let prompt = build_prompt(&options);
        assert!(prompt.contains("Foque nos seguintes tópicos: Rust, HTTP."));
        assert!(!prompt.contains("Varie os tópicos"));
    }

    #[test]
    fn test_empty_topics_fall_back_to_examples() {
        let prompt = build_prompt(&GenerationOptions::default());
        assert!(prompt.contains("Varie os tópicos"));
        assert!(prompt.contains("JavaScript"));
    }

    #[test]
    fn test_difficulty_clause() {
        let mut options = GenerationOptions::default();

        options.difficulty = Difficulty::Dificil;
        assert!(build_prompt(&options).contains("dificuldade \"difícil\""));

        options.difficulty = Difficulty::Misto;
        assert!(build_prompt(&options).contains("Varie a dificuldade"));
    }

    #[test]
    fn test_prompt_mandates_the_json_envelope() {
        let prompt = build_prompt(&GenerationOptions::default());
        assert!(prompt.contains("\"questions\""));
        assert!(prompt.contains("exatamente 4 opções"));
    }
}
