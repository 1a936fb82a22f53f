//! Session loader
//!
//! Issues the single start-or-resume request for a test and seeds the
//! assessment engine from the returned response record. The backend is
//! the one deciding between creating a fresh response and handing back
//! an in-progress one; the loader never retries on failure.

use std::sync::Arc;

use tracing::info;

use super::engine::AssessmentEngine;
use crate::api::ApiBackend;
use crate::error::SessionError;

/// Establishes the initial engine state for a test session
pub struct SessionLoader {
    api: Arc<dyn ApiBackend>,
}

impl SessionLoader {
    pub fn new(api: Arc<dyn ApiBackend>) -> Self {
        Self { api }
    }

    /// Start or resume the caller's session for `test_id`.
    ///
    /// On success the engine's answer map is seeded from any answers
    /// already present on the response (resumption). Failure is terminal
    /// for the flow: the caller surfaces it and offers only a path back.
    pub async fn start(&self, test_id: i64) -> Result<AssessmentEngine, SessionError> {
        let started = self.api.start_test(test_id).await?;
        info!(
            test_id,
            response_id = started.response.id,
            resumed_answers = started.response.answers.len(),
            "assessment session started"
        );
        AssessmentEngine::new(Arc::clone(&self.api), started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockApi, StartedSession};
    use crate::error::ApiError;
    use crate::models::{AnswerValue, Question, QuestionKind, Response, Test};
    use std::collections::HashMap;

    fn question(id: i64, kind: QuestionKind, required: bool) -> Question {
        Question {
            id,
            text: format!("question {}", id),
            kind,
            options: None,
            required,
            section: None,
            placeholder: None,
        }
    }

    fn started(answers: HashMap<i64, AnswerValue>) -> StartedSession {
        StartedSession {
            test: Test {
                id: 1,
                title: "Survey".to_string(),
                description: None,
                questions: vec![
                    question(10, QuestionKind::Text, false),
                    question(11, QuestionKind::Checkbox, false),
                ],
            },
            response: Response {
                id: 55,
                test_id: 1,
                user_id: 7,
                answers,
                is_completed: false,
                image_url: None,
                completed_at: None,
            },
        }
    }

    #[tokio::test]
    async fn start_seeds_engine_from_existing_answers() {
        let api = Arc::new(MockApi::new());
        let mut answers = HashMap::new();
        answers.insert(10, AnswerValue::Text("x".to_string()));
        answers.insert(
            11,
            AnswerValue::Selections(vec!["y".to_string(), "z".to_string()]),
        );
        api.queue_start(Ok(started(answers.clone())));

        let loader = SessionLoader::new(api);
        let engine = loader.start(1).await.unwrap();

        assert_eq!(engine.answers().len(), 2);
        assert_eq!(engine.answer(10), Some(&AnswerValue::Text("x".to_string())));
        assert_eq!(
            engine.answer(11),
            Some(&AnswerValue::Selections(vec![
                "y".to_string(),
                "z".to_string()
            ]))
        );
    }

    #[tokio::test]
    async fn start_with_fresh_response_begins_empty() {
        let api = Arc::new(MockApi::new());
        api.queue_start(Ok(started(HashMap::new())));

        let loader = SessionLoader::new(api);
        let engine = loader.start(1).await.unwrap();

        assert!(engine.answers().is_empty());
        assert_eq!(engine.index(), 0);
    }

    #[tokio::test]
    async fn start_surfaces_not_found() {
        let api = Arc::new(MockApi::new());
        api.queue_start(Err(ApiError::NotFound(
            "Test not found or inactive".to_string(),
        )));

        let loader = SessionLoader::new(api);
        let result = loader.start(99).await;

        assert!(matches!(
            result,
            Err(SessionError::Api(ApiError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn start_surfaces_unauthorized() {
        let api = Arc::new(MockApi::new());
        api.queue_start(Err(ApiError::Unauthorized));

        let loader = SessionLoader::new(api);
        let result = loader.start(1).await;

        assert!(matches!(
            result,
            Err(SessionError::Api(ApiError::Unauthorized))
        ));
    }
}
