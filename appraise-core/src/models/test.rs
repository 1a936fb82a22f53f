//! Test and question wire types

use serde::{Deserialize, Serialize};

/// Closed tag set of question kinds.
///
/// The backend declares the kind as a free-form string; anything we do
/// not recognize lands on `Unknown`, which the renderer maps to a plain
/// text input so the flow is total over backend-declared types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Range,
    #[serde(other)]
    Unknown,
}

/// One question of a test.
///
/// The wire order of questions defines the navigation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "question_text")]
    pub text: String,
    #[serde(rename = "question_type")]
    pub kind: QuestionKind,
    /// Option labels for `Radio`/`Checkbox` kinds
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(rename = "is_required", default)]
    pub required: bool,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl Question {
    /// Option labels, empty for non-choice kinds
    pub fn option_labels(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// A full test definition with its ordered questions.
///
/// Immutable once loaded into a session; fetched once per session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Listing entry for a test, without its questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions_count: u32,
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_parses_known_tags() {
        for (tag, kind) in [
            ("text", QuestionKind::Text),
            ("textarea", QuestionKind::Textarea),
            ("radio", QuestionKind::Radio),
            ("checkbox", QuestionKind::Checkbox),
            ("range", QuestionKind::Range),
        ] {
            let parsed: QuestionKind = serde_json::from_str(&format!("\"{}\"", tag)).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unrecognized_question_kind_falls_back_to_unknown() {
        let parsed: QuestionKind = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(parsed, QuestionKind::Unknown);
    }

    #[test]
    fn question_deserializes_from_backend_shape() {
        let json = r#"{
            "id": 9,
            "test_id": 2,
            "question_text": "How did it go?",
            "question_type": "radio",
            "section": "Section A",
            "options": ["well", "poorly"],
            "is_required": true,
            "placeholder": null,
            "priority_order": 3
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.id, 9);
        assert_eq!(question.kind, QuestionKind::Radio);
        assert_eq!(question.option_labels(), ["well", "poorly"]);
        assert!(question.required);
        assert_eq!(question.section.as_deref(), Some("Section A"));
    }

    #[test]
    fn test_preserves_question_order() {
        let json = r#"{
            "id": 1,
            "title": "Onboarding",
            "description": null,
            "questions": [
                {"id": 3, "question_text": "a", "question_type": "text"},
                {"id": 1, "question_text": "b", "question_type": "text"},
                {"id": 2, "question_text": "c", "question_type": "text"}
            ]
        }"#;
        let test: Test = serde_json::from_str(json).unwrap();

        let ids: Vec<i64> = test.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, [3, 1, 2]);
    }
}
