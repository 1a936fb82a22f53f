//! Mock API backend for testing
//!
//! MockApi scripts the session-facing calls the loader and engine issue,
//! enabling fast, deterministic unit tests. Queue a start result and any
//! failures before driving the flow; every persist-style call is
//! recorded so tests can assert on exactly which calls were issued.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::{ApiBackend, LoginOutcome, LoginRequest, StartedSession};
use crate::error::ApiError;
use crate::models::{AnswerValue, Attachment, Response, TestSummary};

#[derive(Default)]
struct MockState {
    start_results: VecDeque<Result<StartedSession, ApiError>>,

    /// Question ids whose submits fail with a network error
    failing_submits: HashSet<i64>,
    fail_next_complete: bool,
    fail_next_upload: bool,

    submit_calls: Vec<(i64, i64, AnswerValue)>,
    upload_calls: Vec<i64>,
    complete_calls: Vec<i64>,
}

/// Scripted implementation of ApiBackend
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next start call
    pub fn queue_start(&self, result: Result<StartedSession, ApiError>) {
        self.state.lock().unwrap().start_results.push_back(result);
    }

    /// Make every submit for `question_id` fail with a network error
    pub fn fail_submits_for(&self, question_id: i64) {
        self.state.lock().unwrap().failing_submits.insert(question_id);
    }

    /// Let submits for `question_id` succeed again
    pub fn restore_submits_for(&self, question_id: i64) {
        self.state.lock().unwrap().failing_submits.remove(&question_id);
    }

    /// Make the next complete call fail with a network error
    pub fn fail_next_complete(&self) {
        self.state.lock().unwrap().fail_next_complete = true;
    }

    /// Make the next upload call fail with a network error
    pub fn fail_next_upload(&self) {
        self.state.lock().unwrap().fail_next_upload = true;
    }

    /// All recorded submit calls, in issue order
    pub fn submit_calls(&self) -> Vec<(i64, i64, AnswerValue)> {
        self.state.lock().unwrap().submit_calls.clone()
    }

    /// Response ids passed to upload calls
    pub fn upload_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().upload_calls.clone()
    }

    /// Response ids passed to complete calls
    pub fn complete_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().complete_calls.clone()
    }

    fn network_error(context: &str) -> ApiError {
        ApiError::Network(format!("mock failure: {}", context))
    }
}

#[async_trait]
impl ApiBackend for MockApi {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginOutcome, ApiError> {
        Err(Self::network_error("login is not scripted"))
    }

    async fn list_tests(&self) -> Result<Vec<TestSummary>, ApiError> {
        Ok(Vec::new())
    }

    async fn start_test(&self, _test_id: i64) -> Result<StartedSession, ApiError> {
        self.state
            .lock()
            .unwrap()
            .start_results
            .pop_front()
            .unwrap_or_else(|| Err(Self::network_error("no queued start result")))
    }

    async fn submit_answer(
        &self,
        response_id: i64,
        question_id: i64,
        value: &AnswerValue,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .submit_calls
            .push((response_id, question_id, value.clone()));
        if state.failing_submits.contains(&question_id) {
            return Err(Self::network_error("submit"));
        }
        Ok(())
    }

    async fn upload_image(
        &self,
        response_id: i64,
        _attachment: &Attachment,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.upload_calls.push(response_id);
        if std::mem::take(&mut state.fail_next_upload) {
            return Err(Self::network_error("upload"));
        }
        Ok(())
    }

    async fn complete(&self, response_id: i64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.complete_calls.push(response_id);
        if std::mem::take(&mut state.fail_next_complete) {
            return Err(Self::network_error("complete"));
        }
        Ok(())
    }

    async fn list_responses(&self) -> Result<Vec<Response>, ApiError> {
        Ok(Vec::new())
    }
}
