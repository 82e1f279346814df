//! Normalized answer value object

use serde::{Deserialize, Serialize};

use super::raw::RawResult;

/// Placeholder shown when no confidence is available
pub const NO_VALUE: &str = "—";

/// The canonical `(answer, confidence, method)` display triple.
///
/// `answer` is always present, even when the handler failed or returned
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnswer {
    pub answer: String,
    pub confidence: Option<f64>,
    pub method: String,
}

impl NormalizedAnswer {
    pub fn new(answer: impl Into<String>, confidence: Option<f64>, method: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            confidence,
            method: method.into(),
        }
    }

    /// Confidence with two decimals, or an em-dash when absent
    pub fn confidence_display(&self) -> String {
        match self.confidence {
            Some(c) => format!("{:.2}", c),
            None => NO_VALUE.to_string(),
        }
    }

    /// Method label, or an em-dash when empty
    pub fn method_display(&self) -> &str {
        if self.method.is_empty() {
            NO_VALUE
        } else {
            &self.method
        }
    }

    /// Turn the triple back into a raw three-element result
    pub fn into_raw(self) -> RawResult {
        RawResult::TextWithConfidenceAndMethod {
            answer: self.answer,
            confidence: self.confidence,
            method: self.method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_display() {
        let a = NormalizedAnswer::new("Paris", Some(0.93), "semantic-search");
        assert_eq!(a.confidence_display(), "0.93");

        let b = NormalizedAnswer::new("Paris", Some(0.5), "RAG");
        assert_eq!(b.confidence_display(), "0.50");

        let c = NormalizedAnswer::new("Paris", None, "RAG");
        assert_eq!(c.confidence_display(), "—");
    }

    #[test]
    fn test_method_display_placeholder() {
        let a = NormalizedAnswer::new("x", None, "");
        assert_eq!(a.method_display(), "—");
    }

    #[test]
    fn test_serialize() {
        let a = NormalizedAnswer::new("Yes", Some(0.5), "RAG");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["answer"], "Yes");
        assert_eq!(json["confidence"], 0.5);
        assert_eq!(json["method"], "RAG");
    }
}
