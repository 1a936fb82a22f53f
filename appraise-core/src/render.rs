//! Answer renderer
//!
//! A pure, total mapping from a question's declared kind to the concrete
//! input widget and its current value. Unknown backend-declared kinds
//! fall back to a plain text input, so rendering never fails on data the
//! client has not seen before.

use crate::models::{AnswerValue, Question, QuestionKind};

/// Slider bounds for range questions
pub const RANGE_MIN: u32 = 0;
pub const RANGE_MAX: u32 = 100;

/// Input widget to present for one question
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetSpec {
    TextInput {
        value: String,
        placeholder: Option<String>,
    },
    TextArea {
        value: String,
        placeholder: Option<String>,
        rows: u8,
    },
    /// Exactly one of `options` selected, represented as a plain string
    RadioGroup {
        options: Vec<String>,
        selected: Option<String>,
    },
    /// A subset of `options`, order-irrelevant
    CheckboxGroup {
        options: Vec<String>,
        selected: Vec<String>,
    },
    Slider {
        min: u32,
        max: u32,
        value: u32,
    },
}

/// Map a question and its current answer to a widget.
///
/// Stateless; called on every render.
pub fn render_input(question: &Question, current: Option<&AnswerValue>) -> WidgetSpec {
    let text_value = || {
        current
            .and_then(AnswerValue::as_text)
            .unwrap_or_default()
            .to_string()
    };

    match question.kind {
        QuestionKind::Text | QuestionKind::Unknown => WidgetSpec::TextInput {
            value: text_value(),
            placeholder: question.placeholder.clone(),
        },
        QuestionKind::Textarea => WidgetSpec::TextArea {
            value: text_value(),
            placeholder: question.placeholder.clone(),
            rows: 4,
        },
        QuestionKind::Radio => WidgetSpec::RadioGroup {
            options: question.option_labels().to_vec(),
            selected: current
                .and_then(AnswerValue::as_text)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        },
        QuestionKind::Checkbox => WidgetSpec::CheckboxGroup {
            options: question.option_labels().to_vec(),
            selected: current.map(|v| v.selections().to_vec()).unwrap_or_default(),
        },
        QuestionKind::Range => {
            let midpoint = RANGE_MIN + (RANGE_MAX - RANGE_MIN) / 2;
            let value = current
                .and_then(AnswerValue::as_text)
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(midpoint)
                .clamp(RANGE_MIN, RANGE_MAX);
            WidgetSpec::Slider {
                min: RANGE_MIN,
                max: RANGE_MAX,
                value,
            }
        }
    }
}
