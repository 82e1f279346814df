//! Query request value object

use crate::answer::mode::AnswerMode;
use serde::{Deserialize, Serialize};

/// A single user-triggered run (Value Object)
///
/// Unlike most value objects the query text is not validated here: a blank
/// query is a legitimate input that the run answers with a prompt instead of
/// calling a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    query: String,
    mode: AnswerMode,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, mode: AnswerMode) -> Self {
        Self {
            query: query.into(),
            mode,
        }
    }

    /// Get the query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get the selected mode
    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    /// True when the query is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

impl std::fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.mode, self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = QueryRequest::new("What is the capital of France?", AnswerMode::Rag);
        assert_eq!(req.query(), "What is the capital of France?");
        assert_eq!(req.mode(), AnswerMode::Rag);
        assert!(!req.is_blank());
    }

    #[test]
    fn test_blank_query_is_allowed() {
        assert!(QueryRequest::new("", AnswerMode::Rag).is_blank());
        assert!(QueryRequest::new("  \t", AnswerMode::FineTuned).is_blank());
    }

    #[test]
    fn test_display() {
        let req = QueryRequest::new("hello", AnswerMode::FineTuned);
        assert_eq!(req.to_string(), "[Fine-Tuned] hello");
    }
}
