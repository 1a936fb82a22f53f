//! Response and answer wire types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The value a user has provided for one question.
///
/// Serialized untagged to match the backend contract: a plain string for
/// text and range questions (range values travel as numeric strings), an
/// array of option labels for checkbox questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Selections(Vec<String>),
    Text(String),
}

impl AnswerValue {
    /// True when the value carries no content.
    ///
    /// Required-field gating treats an empty string or empty selection
    /// set the same as no answer at all.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.is_empty(),
            AnswerValue::Selections(options) => options.is_empty(),
        }
    }

    /// The text payload, if this is a text-shaped answer
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Selections(_) => None,
        }
    }

    /// The selected options, empty for text-shaped answers
    pub fn selections(&self) -> &[String] {
        match self {
            AnswerValue::Selections(options) => options,
            AnswerValue::Text(_) => &[],
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(options: Vec<String>) -> Self {
        AnswerValue::Selections(options)
    }
}

/// One user's in-progress or completed attempt at a test.
///
/// Created (or resumed) server-side by the start call; the answer map is
/// keyed by question id, with insertion order irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: i64,
    pub test_id: i64,
    pub user_id: i64,
    #[serde(rename = "responses", default)]
    pub answers: HashMap<i64, AnswerValue>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_value_text_roundtrip() {
        let value = AnswerValue::Text("hello".to_string());
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"hello\"");
        let parsed: AnswerValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn answer_value_selections_roundtrip() {
        let value = AnswerValue::Selections(vec!["y".to_string(), "z".to_string()]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "[\"y\",\"z\"]");
        let parsed: AnswerValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn empty_values_count_as_no_answer() {
        assert!(AnswerValue::Text(String::new()).is_empty());
        assert!(AnswerValue::Selections(vec![]).is_empty());
        assert!(!AnswerValue::Text("x".to_string()).is_empty());
        assert!(!AnswerValue::Selections(vec!["x".to_string()]).is_empty());
    }

    #[test]
    fn response_deserializes_answers_keyed_by_question_id() {
        let json = r#"{
            "id": 5,
            "test_id": 2,
            "user_id": 7,
            "responses": {"10": "x", "11": ["y", "z"]},
            "is_completed": false,
            "image_url": null,
            "started_at": "2024-05-01T10:00:00",
            "completed_at": null
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();

        assert_eq!(response.answers.len(), 2);
        assert_eq!(response.answers[&10], AnswerValue::Text("x".to_string()));
        assert_eq!(
            response.answers[&11],
            AnswerValue::Selections(vec!["y".to_string(), "z".to_string()])
        );
    }

    #[test]
    fn response_with_missing_answer_map_starts_empty() {
        let json = r#"{"id": 5, "test_id": 2, "user_id": 7}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.answers.is_empty());
        assert!(!response.is_completed);
    }
}
