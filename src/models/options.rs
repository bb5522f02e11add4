use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::protocol::{DEFAULT_COUNT, DEFAULT_LANGUAGE};

/// Requested difficulty for a generation call.
///
/// `Misto` asks the generator to mix levels; questions themselves only ever
/// carry one of the three concrete levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "fácil")]
    Facil,
    #[serde(rename = "médio")]
    Medio,
    #[serde(rename = "difícil")]
    Dificil,
    #[default]
    #[serde(rename = "misto")]
    Misto,
}

impl Difficulty {
    /// The wire value, as the endpoint and the prompt spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Facil => "fácil",
            Difficulty::Medio => "médio",
            Difficulty::Dificil => "difícil",
            Difficulty::Misto => "misto",
        }
    }

    /// Parse user input, accents optional.
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_lowercase().as_str() {
            "fácil" | "facil" => Ok(Difficulty::Facil),
            "médio" | "medio" => Ok(Difficulty::Medio),
            "difícil" | "dificil" => Ok(Difficulty::Dificil),
            "misto" => Ok(Difficulty::Misto),
            other => Err(format!(
                "dificuldade desconhecida: {other} (use fácil, médio, difícil ou misto)"
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::parse(s)
    }
}

/// Options for one generation request.
///
/// Doubles as the body of `POST /api/quiz/generate`; every field is
/// optional on the wire and falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Requested number of questions, semantically bounded to 1..=10.
    pub count: usize,
    pub difficulty: Difficulty,
    /// Topics to focus on; empty means "vary topics". Order is kept for
    /// prompt readability.
    pub topics: Vec<String>,
    pub language: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            difficulty: Difficulty::Misto,
            topics: Vec::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty_with_and_without_accents() {
        assert_eq!(Difficulty::parse("fácil"), Ok(Difficulty::Facil));
        assert_eq!(Difficulty::parse("facil"), Ok(Difficulty::Facil));
        assert_eq!(Difficulty::parse("MEDIO"), Ok(Difficulty::Medio));
        assert_eq!(Difficulty::parse(" difícil "), Ok(Difficulty::Dificil));
        assert_eq!(Difficulty::parse("misto"), Ok(Difficulty::Misto));
        assert!(Difficulty::parse("extremo").is_err());
    }

    #[test]
    fn test_difficulty_wire_values() {
        let json = serde_json::to_string(&Difficulty::Medio).unwrap();
        assert_eq!(json, "\"médio\"");

        let parsed: Difficulty = serde_json::from_str("\"misto\"").unwrap();
        assert_eq!(parsed, Difficulty::Misto);
    }
}
