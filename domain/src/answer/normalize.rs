//! Output normalization.
//!
//! [`normalize`] maps every [`RawResult`] shape onto a [`NormalizedAnswer`]:
//!
//! | RawResult | answer | confidence | method |
//! |-----------|--------|------------|--------|
//! | `Absent` | `(No answer returned)` | none | mode label |
//! | `(a, c, m)` | `a` | `c` | `m` |
//! | `(a, number)` | `a` | number | mode label |
//! | `(a, method)` | `a` | none | method |
//! | other sequence | space-joined elements | none | mode label |
//! | keyed fields | `answer`/`output`/`result` | `confidence`/`score`/`prob` | `method`/`mode` |
//! | text | text | none | mode label |
//! | failure | `Error calling h(): msg` | none | mode label |
//!
//! Missing or non-numeric confidences are `None`, never `0.0`.

use serde_json::{Map, Value};

use super::mode::AnswerMode;
use super::normalized::NormalizedAnswer;
use super::raw::{RawResult, value_text};

/// Answer text when the handler returned nothing
pub const NO_ANSWER_RETURNED: &str = "(No answer returned)";

/// Answer text when a keyed result has none of the answer keys
pub const NO_ANSWER_FIELD: &str = "(No 'answer' field)";

const ANSWER_KEYS: [&str; 3] = ["answer", "output", "result"];
const CONFIDENCE_KEYS: [&str; 3] = ["confidence", "score", "prob"];
const METHOD_KEYS: [&str; 2] = ["method", "mode"];

/// Reduce a raw handler result to the display triple.
pub fn normalize(raw: RawResult, mode: AnswerMode) -> NormalizedAnswer {
    let mode_label = mode.label();

    match raw {
        RawResult::Absent => NormalizedAnswer::new(NO_ANSWER_RETURNED, None, mode_label),
        RawResult::TextOnly(answer) => NormalizedAnswer::new(answer, None, mode_label),
        RawResult::TextWithConfidence { answer, confidence } => {
            NormalizedAnswer::new(answer, Some(confidence), mode_label)
        }
        RawResult::TextWithMethod { answer, method } => NormalizedAnswer::new(answer, None, method),
        RawResult::TextWithConfidenceAndMethod {
            answer,
            confidence,
            method,
        } => NormalizedAnswer::new(answer, confidence, method),
        RawResult::Sequence(items) => {
            let joined = items.iter().map(value_text).collect::<Vec<_>>().join(" ");
            NormalizedAnswer::new(joined, None, mode_label)
        }
        RawResult::KeyedFields(fields) => normalize_keyed(&fields, mode_label),
        RawResult::Failed { handler, message } => NormalizedAnswer::new(
            format!("Error calling {}(): {}", handler, message),
            None,
            mode_label,
        ),
    }
}

fn normalize_keyed(fields: &Map<String, Value>, mode_label: &str) -> NormalizedAnswer {
    let answer = first_present(fields, &ANSWER_KEYS)
        .map(value_text)
        .unwrap_or_else(|| NO_ANSWER_FIELD.to_string());

    let confidence = first_present(fields, &CONFIDENCE_KEYS).and_then(coerce_confidence);

    let method = first_present(fields, &METHOD_KEYS)
        .map(value_text)
        .unwrap_or_else(|| mode_label.to_string());

    NormalizedAnswer::new(answer, confidence, method)
}

/// First key whose value is neither `null` nor an empty string
fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| fields.get(*k)).find(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// Numbers pass through, numeric strings are parsed, anything else is `None`
fn coerce_confidence(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(value: Value) -> RawResult {
        RawResult::from_json(value)
    }

    #[test]
    fn test_absent() {
        let out = normalize(RawResult::Absent, AnswerMode::Rag);
        assert_eq!(out.answer, "(No answer returned)");
        assert_eq!(out.confidence, None);
        assert_eq!(out.method, "RAG");
    }

    #[test]
    fn test_triple_passes_through_unchanged() {
        let out = normalize(
            RawResult::full("Paris", Some(0.93), "semantic-search"),
            AnswerMode::Rag,
        );
        assert_eq!(out, NormalizedAnswer::new("Paris", Some(0.93), "semantic-search"));
    }

    #[test]
    fn test_triple_keeps_out_of_range_confidence() {
        let out = normalize(RawResult::full("x", Some(7.0), "m"), AnswerMode::Rag);
        assert_eq!(out.confidence, Some(7.0));
    }

    #[test]
    fn test_pair_with_number_uses_mode_label() {
        let out = normalize(RawResult::with_confidence("Paris", 0.87), AnswerMode::FineTuned);
        assert_eq!(out, NormalizedAnswer::new("Paris", Some(0.87), "Fine-Tuned"));
    }

    #[test]
    fn test_pair_with_method() {
        let out = normalize(RawResult::with_method("Paris", "exact-match"), AnswerMode::Rag);
        assert_eq!(out, NormalizedAnswer::new("Paris", None, "exact-match"));
    }

    #[test]
    fn test_sequence_is_space_joined() {
        let out = normalize(keyed(json!(["a", 1, "b", 2.5])), AnswerMode::Rag);
        assert_eq!(out.answer, "a 1 b 2.5");
        assert_eq!(out.confidence, None);
        assert_eq!(out.method, "RAG");
    }

    #[test]
    fn test_empty_sequence_still_has_answer() {
        let out = normalize(RawResult::Sequence(vec![]), AnswerMode::Rag);
        assert_eq!(out.answer, "");
        assert_eq!(out.method, "RAG");
    }

    #[test]
    fn test_keyed_answer_and_score() {
        let out = normalize(keyed(json!({"answer": "Yes", "score": 0.5})), AnswerMode::Rag);
        assert_eq!(out, NormalizedAnswer::new("Yes", Some(0.5), "RAG"));
    }

    #[test]
    fn test_keyed_fallback_keys() {
        let out = normalize(
            keyed(json!({"result": "42", "prob": "0.25", "mode": "bm25"})),
            AnswerMode::FineTuned,
        );
        assert_eq!(out, NormalizedAnswer::new("42", Some(0.25), "bm25"));
    }

    #[test]
    fn test_keyed_priority_order() {
        let out = normalize(
            keyed(json!({
                "output": "second",
                "answer": "first",
                "score": 0.1,
                "confidence": 0.9,
                "mode": "m2",
                "method": "m1"
            })),
            AnswerMode::Rag,
        );
        assert_eq!(out, NormalizedAnswer::new("first", Some(0.9), "m1"));
    }

    #[test]
    fn test_keyed_skips_null_and_empty_values() {
        let out = normalize(
            keyed(json!({"answer": "", "output": null, "result": "fallback", "confidence": null, "score": 0.4})),
            AnswerMode::Rag,
        );
        assert_eq!(out.answer, "fallback");
        assert_eq!(out.confidence, Some(0.4));
    }

    #[test]
    fn test_keyed_missing_answer() {
        let out = normalize(keyed(json!({"confidence": 0.8})), AnswerMode::Rag);
        assert_eq!(out.answer, "(No 'answer' field)");
        assert_eq!(out.confidence, Some(0.8));
        assert_eq!(out.method, "RAG");
    }

    #[test]
    fn test_keyed_uncoercible_confidence_is_none() {
        let out = normalize(keyed(json!({"answer": "a", "confidence": "very"})), AnswerMode::Rag);
        assert_eq!(out.confidence, None);
    }

    #[test]
    fn test_keyed_zero_confidence_is_kept() {
        let out = normalize(keyed(json!({"answer": "a", "confidence": 0})), AnswerMode::Rag);
        assert_eq!(out.confidence, Some(0.0));
    }

    #[test]
    fn test_plain_text() {
        let out = normalize(RawResult::text("just text"), AnswerMode::FineTuned);
        assert_eq!(out, NormalizedAnswer::new("just text", None, "Fine-Tuned"));
    }

    #[test]
    fn test_failure_mentions_handler() {
        let out = normalize(RawResult::failed("rag_answer", "index missing"), AnswerMode::Rag);
        assert_eq!(out.answer, "Error calling rag_answer(): index missing");
        assert_eq!(out.confidence, None);
    }

    #[test]
    fn test_normalized_triple_is_a_fixed_point() {
        let cases = [
            NormalizedAnswer::new("Paris", Some(0.93), "semantic-search"),
            NormalizedAnswer::new("(No answer returned)", None, "RAG"),
            NormalizedAnswer::new("", Some(0.0), ""),
        ];
        for case in cases {
            let again = normalize(case.clone().into_raw(), AnswerMode::FineTuned);
            assert_eq!(again, case);
        }
    }
}
