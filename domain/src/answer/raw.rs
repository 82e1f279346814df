//! Raw handler results.
//!
//! A handler may answer with plain text, a pair, a triple, an arbitrary
//! sequence, or a keyed record. [`RawResult`] names each of those shapes as a
//! variant so that [`normalize`](super::normalize::normalize) is a single
//! exhaustive match.
//!
//! Dynamic sources (JSON printed by an external command) go through
//! [`RawResult::from_json`], which decides the variant from the JSON shape.

use serde_json::{Map, Value};

/// Unprocessed value (or captured failure) produced by invoking a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// The handler returned nothing
    Absent,
    /// Plain text, or any scalar already rendered as text
    TextOnly(String),
    /// `(answer, confidence)`
    TextWithConfidence { answer: String, confidence: f64 },
    /// `(answer, method)`
    TextWithMethod { answer: String, method: String },
    /// `(answer, confidence, method)`; the confidence slot may be empty
    TextWithConfidenceAndMethod {
        answer: String,
        confidence: Option<f64>,
        method: String,
    },
    /// An ordered sequence whose length is not 2 or 3
    Sequence(Vec<Value>),
    /// A key-value record such as `{"answer": ..., "score": ...}`
    KeyedFields(Map<String, Value>),
    /// The handler failed; captured instead of propagated
    Failed { handler: String, message: String },
}

impl RawResult {
    pub fn text(answer: impl Into<String>) -> Self {
        Self::TextOnly(answer.into())
    }

    pub fn with_confidence(answer: impl Into<String>, confidence: f64) -> Self {
        Self::TextWithConfidence {
            answer: answer.into(),
            confidence,
        }
    }

    pub fn with_method(answer: impl Into<String>, method: impl Into<String>) -> Self {
        Self::TextWithMethod {
            answer: answer.into(),
            method: method.into(),
        }
    }

    pub fn full(
        answer: impl Into<String>,
        confidence: Option<f64>,
        method: impl Into<String>,
    ) -> Self {
        Self::TextWithConfidenceAndMethod {
            answer: answer.into(),
            confidence,
            method: method.into(),
        }
    }

    pub fn failed(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Classify a JSON value by shape.
    ///
    /// | JSON | Variant |
    /// |------|---------|
    /// | `null` | `Absent` |
    /// | string, number, bool | `TextOnly` |
    /// | `[a, c, m]` | `TextWithConfidenceAndMethod` (non-numeric `c` becomes `None`) |
    /// | `[a, number]` | `TextWithConfidence` |
    /// | `[a, other]` | `TextWithMethod` |
    /// | any other array | `Sequence` |
    /// | object | `KeyedFields` |
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::TextOnly(s),
            Value::Bool(_) | Value::Number(_) => Self::TextOnly(value_text(&value)),
            Value::Array(items) => match items.as_slice() {
                [answer, confidence, method] => Self::TextWithConfidenceAndMethod {
                    answer: value_text(answer),
                    confidence: confidence.as_f64(),
                    method: value_text(method),
                },
                [answer, second] => match second.as_f64() {
                    Some(confidence) => Self::TextWithConfidence {
                        answer: value_text(answer),
                        confidence,
                    },
                    None => Self::TextWithMethod {
                        answer: value_text(answer),
                        method: value_text(second),
                    },
                },
                _ => Self::Sequence(items),
            },
            Value::Object(fields) => Self::KeyedFields(fields),
        }
    }

    /// Short variant name for logs
    pub fn shape(&self) -> &'static str {
        match self {
            RawResult::Absent => "absent",
            RawResult::TextOnly(_) => "text",
            RawResult::TextWithConfidence { .. } => "text+confidence",
            RawResult::TextWithMethod { .. } => "text+method",
            RawResult::TextWithConfidenceAndMethod { .. } => "text+confidence+method",
            RawResult::Sequence(_) => "sequence",
            RawResult::KeyedFields(_) => "keyed",
            RawResult::Failed { .. } => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RawResult::Failed { .. })
    }
}

impl From<String> for RawResult {
    fn from(s: String) -> Self {
        Self::TextOnly(s)
    }
}

impl From<&str> for RawResult {
    fn from(s: &str) -> Self {
        Self::TextOnly(s.to_string())
    }
}

impl<T: Into<RawResult>> From<Option<T>> for RawResult {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Render a JSON value as display text.
///
/// Strings are used verbatim (no surrounding quotes); everything else uses its
/// compact JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_null_is_absent() {
        assert_eq!(RawResult::from_json(Value::Null), RawResult::Absent);
    }

    #[test]
    fn test_from_json_scalars_are_text() {
        assert_eq!(RawResult::from_json(json!("Paris")), RawResult::text("Paris"));
        assert_eq!(RawResult::from_json(json!(42)), RawResult::text("42"));
        assert_eq!(RawResult::from_json(json!(true)), RawResult::text("true"));
    }

    #[test]
    fn test_from_json_triple() {
        let raw = RawResult::from_json(json!(["Paris", 0.93, "semantic-search"]));
        assert_eq!(raw, RawResult::full("Paris", Some(0.93), "semantic-search"));
    }

    #[test]
    fn test_from_json_triple_with_non_numeric_confidence() {
        let raw = RawResult::from_json(json!(["Paris", "high", "bm25"]));
        assert_eq!(raw, RawResult::full("Paris", None, "bm25"));
    }

    #[test]
    fn test_from_json_pairs() {
        assert_eq!(
            RawResult::from_json(json!(["Paris", 0.87])),
            RawResult::with_confidence("Paris", 0.87)
        );
        assert_eq!(
            RawResult::from_json(json!(["Paris", "exact-match"])),
            RawResult::with_method("Paris", "exact-match")
        );
    }

    #[test]
    fn test_from_json_other_arrays_are_sequences() {
        assert!(matches!(
            RawResult::from_json(json!(["only"])),
            RawResult::Sequence(items) if items.len() == 1
        ));
        assert!(matches!(
            RawResult::from_json(json!([1, 2, 3, 4])),
            RawResult::Sequence(items) if items.len() == 4
        ));
    }

    #[test]
    fn test_from_json_object_is_keyed() {
        let raw = RawResult::from_json(json!({"answer": "Yes", "score": 0.5}));
        assert_eq!(raw.shape(), "keyed");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(RawResult::from(None::<&str>), RawResult::Absent);
        assert_eq!(RawResult::from(Some("hi")), RawResult::text("hi"));
    }

    #[test]
    fn test_value_text_strips_quotes_only_for_strings() {
        assert_eq!(value_text(&json!("a")), "a");
        assert_eq!(value_text(&json!(1.5)), "1.5");
        assert_eq!(value_text(&json!(null)), "null");
    }
}
