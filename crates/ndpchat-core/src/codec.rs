//! Model-response decoding.
//!
//! Every model response in the system is decoded with the same rule: either
//! a fenced block whose first line is the fence plus language tag, or raw
//! JSON text. No brace-scanning, no repair. The typed wrappers below are
//! the only places that know which payload shape to expect.

use serde_json::Value;
use thiserror::Error;

use crate::types::{Intent, Judgment};

/// Protocol decode errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The text is neither valid JSON nor a fenced block containing valid
    /// JSON.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    /// The decoded value lacks a required field, or a required invariant
    /// between fields does not hold.
    #[error("model response missing field: {0}")]
    MissingField(&'static str),
}

/// Decode a model response into a JSON value.
///
/// A response starting with a fence marker loses its first line (the fence
/// and language tag) and its trailing fence line; anything else is parsed
/// verbatim.
pub fn decode(raw_text: &str) -> Result<Value, ProtocolError> {
    let text = raw_text.trim();
    let payload = if text.starts_with("```") {
        let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
        body.rsplit_once('\n').map(|(body, _)| body).unwrap_or("")
    } else {
        text
    };
    serde_json::from_str(payload).map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
}

/// Decode an intent-classification reply.
///
/// Enforces the Intent invariant: a search intent has at least one term, a
/// non-search intent carries an alternative answer.
pub fn decode_intent(raw_text: &str) -> Result<Intent, ProtocolError> {
    let value = decode(raw_text)?;
    let object = value
        .as_object()
        .ok_or_else(|| ProtocolError::MalformedResponse("expected a JSON object".to_string()))?;

    let is_search_data = object
        .get("is_search_data")
        .and_then(Value::as_bool)
        .ok_or(ProtocolError::MissingField("is_search_data"))?;

    if is_search_data {
        let search_terms = object
            .get("search_terms")
            .and_then(Value::as_array)
            .map(|terms| {
                terms
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|terms| !terms.is_empty())
            .ok_or(ProtocolError::MissingField("search_terms"))?;
        Ok(Intent::search(search_terms))
    } else {
        let alternative_answer = object
            .get("alternative_answer")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingField("alternative_answer"))?;
        Ok(Intent::answer(alternative_answer))
    }
}

/// Decode a judgment-list reply.
pub fn decode_judgments(raw_text: &str) -> Result<Vec<Judgment>, ProtocolError> {
    let value = decode(raw_text)?;
    let items = value
        .as_array()
        .ok_or_else(|| ProtocolError::MalformedResponse("expected a JSON list".to_string()))?;

    let mut judgments = Vec::with_capacity(items.len());
    for item in items {
        judgments.push(Judgment {
            dataset_id: required_str(item, "dataset_id")?,
            title: required_str(item, "title")?,
            summary: required_str(item, "summary")?,
            is_relevant: item
                .get("is_relevant")
                .and_then(Value::as_bool)
                .ok_or(ProtocolError::MissingField("is_relevant"))?,
            reason: required_str(item, "reason")?,
        });
    }
    Ok(judgments)
}

fn required_str(value: &Value, field: &'static str) -> Result<String, ProtocolError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ProtocolError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fence(language: &str, body: &str) -> String {
        format!("```{}\n{}\n```", language, body)
    }

    #[test]
    fn test_decode_round_trip_fenced_and_raw() {
        let value = json!({"is_search_data": true, "search_terms": ["a", "b"]});
        let raw = serde_json::to_string(&value).unwrap();

        assert_eq!(decode(&raw).unwrap(), value);
        assert_eq!(decode(&fence("json", &raw)).unwrap(), value);
    }

    #[test]
    fn test_decode_rejects_prose() {
        let result = decode("Sure! Here are the datasets you asked for.");
        assert!(matches!(result, Err(ProtocolError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_rejects_fenced_prose() {
        let result = decode(&fence("json", "not json at all"));
        assert!(matches!(result, Err(ProtocolError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_intent_search_branch() {
        let raw = r#"{"is_search_data": true, "search_terms": ["earthquake", "California"]}"#;
        let intent = decode_intent(raw).unwrap();
        assert!(intent.is_search_data);
        assert_eq!(intent.search_terms, vec!["earthquake", "California"]);
    }

    #[test]
    fn test_decode_intent_non_search_branch() {
        let raw = r#"{"is_search_data": false, "alternative_answer": "NDP is a national data platform."}"#;
        let intent = decode_intent(raw).unwrap();
        assert!(!intent.is_search_data);
        assert_eq!(
            intent.alternative_answer.as_deref(),
            Some("NDP is a national data platform.")
        );
    }

    #[test]
    fn test_decode_intent_missing_flag() {
        let result = decode_intent(r#"{"search_terms": ["x"]}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MissingField("is_search_data"))
        ));
    }

    #[test]
    fn test_decode_intent_search_without_terms() {
        let result = decode_intent(r#"{"is_search_data": true, "search_terms": []}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MissingField("search_terms"))
        ));
    }

    #[test]
    fn test_decode_intent_non_search_without_answer() {
        let result = decode_intent(r#"{"is_search_data": false}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MissingField("alternative_answer"))
        ));
    }

    #[test]
    fn test_decode_judgments_fenced_list() {
        let raw = fence(
            "json",
            r#"[{"dataset_id":"ds-1","title":"T","summary":"S","is_relevant":true,"reason":"R"}]"#,
        );
        let judgments = decode_judgments(&raw).unwrap();
        assert_eq!(judgments.len(), 1);
        assert_eq!(judgments[0].dataset_id, "ds-1");
        assert!(judgments[0].is_relevant);
    }

    #[test]
    fn test_decode_judgments_rejects_object() {
        let result = decode_judgments(r#"{"dataset_id":"ds-1"}"#);
        assert!(matches!(result, Err(ProtocolError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_judgments_missing_reason() {
        let raw = r#"[{"dataset_id":"ds-1","title":"T","summary":"S","is_relevant":false}]"#;
        let result = decode_judgments(raw);
        assert!(matches!(result, Err(ProtocolError::MissingField("reason"))));
    }
}
