//! Answer mode definitions.
//!
//! [`AnswerMode`] selects between the two answer-generation strategies. Its
//! display label doubles as the default method label of a run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::DomainError;

/// Answer-generation mode, the single user-facing mode axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerMode {
    /// Retrieval-augmented generation
    #[default]
    Rag,
    /// Fine-tuned model inference
    FineTuned,
}

impl AnswerMode {
    /// All modes, in selector order
    pub const ALL: [AnswerMode; 2] = [AnswerMode::Rag, AnswerMode::FineTuned];

    /// Label shown to users and passed to two-argument handlers
    pub fn label(&self) -> &'static str {
        match self {
            AnswerMode::Rag => "RAG",
            AnswerMode::FineTuned => "Fine-Tuned",
        }
    }

    /// Stable lowercase key used in config files and on the command line
    pub fn as_key(&self) -> &'static str {
        match self {
            AnswerMode::Rag => "rag",
            AnswerMode::FineTuned => "fine-tuned",
        }
    }

    /// The other mode
    pub fn toggle(&self) -> Self {
        match self {
            AnswerMode::Rag => AnswerMode::FineTuned,
            AnswerMode::FineTuned => AnswerMode::Rag,
        }
    }
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AnswerMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rag" | "r" => Ok(AnswerMode::Rag),
            "fine-tuned" | "fine_tuned" | "finetuned" | "ft" | "f" => Ok(AnswerMode::FineTuned),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(AnswerMode::Rag.label(), "RAG");
        assert_eq!(AnswerMode::FineTuned.label(), "Fine-Tuned");
        assert_eq!(format!("{}", AnswerMode::FineTuned), "Fine-Tuned");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("RAG".parse::<AnswerMode>().unwrap(), AnswerMode::Rag);
        assert_eq!("Fine-Tuned".parse::<AnswerMode>().unwrap(), AnswerMode::FineTuned);
        assert_eq!("ft".parse::<AnswerMode>().unwrap(), AnswerMode::FineTuned);
        assert!("hybrid".parse::<AnswerMode>().is_err());
    }

    #[test]
    fn test_label_round_trips_through_from_str() {
        for mode in AnswerMode::ALL {
            assert_eq!(mode.label().parse::<AnswerMode>().unwrap(), mode);
            assert_eq!(mode.as_key().parse::<AnswerMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_toggle() {
        assert_eq!(AnswerMode::Rag.toggle(), AnswerMode::FineTuned);
        assert_eq!(AnswerMode::FineTuned.toggle(), AnswerMode::Rag);
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&AnswerMode::FineTuned).unwrap();
        assert_eq!(json, "\"fine-tuned\"");
        let mode: AnswerMode = serde_json::from_str("\"rag\"").unwrap();
        assert_eq!(mode, AnswerMode::Rag);
    }
}
