//! Assessment engine
//!
//! The state machine owning the current question index, the local answer
//! map, the pending attachment, and the submission lifecycle. Local state
//! always updates synchronously; persistence is eventually consistent via
//! per-edit best-effort auto-saves, with a reconciliation pass at finalize
//! time as the correctness backstop.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use super::state::SessionPhase;
use crate::api::{ApiBackend, StartedSession};
use crate::error::{ApiError, SessionError, ValidationError};
use crate::models::{AnswerValue, Attachment, Question, Test};

/// Interactive state machine for one assessment session.
///
/// Constructed by the [`SessionLoader`](super::SessionLoader) from a
/// started (or resumed) session. All transitions happen on discrete
/// caller events; no background timers exist.
pub struct AssessmentEngine {
    api: Arc<dyn ApiBackend>,
    test: Test,
    response_id: i64,
    phase: SessionPhase,
    /// 0-based, always within `[0, question_count - 1]`
    index: usize,
    answers: HashMap<i64, AnswerValue>,
    /// Question ids whose latest answer the backend has acknowledged.
    /// Shared with spawned auto-save tasks.
    confirmed: Arc<Mutex<HashSet<i64>>>,
    /// Auto-save failures swallowed so far
    swallowed_saves: Arc<AtomicU64>,
    attachment: Option<Attachment>,
}

impl AssessmentEngine {
    /// Build an engine from a started session, seeding the answer map
    /// from answers already present on the response.
    ///
    /// Seeded answers came from the server, so they start out confirmed
    /// and are not re-sent by the finalize reconciliation pass.
    pub fn new(api: Arc<dyn ApiBackend>, started: StartedSession) -> Result<Self, SessionError> {
        if started.test.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        let confirmed: HashSet<i64> = started.response.answers.keys().copied().collect();

        Ok(Self {
            api,
            test: started.test,
            response_id: started.response.id,
            phase: SessionPhase::InProgress,
            index: 0,
            answers: started.response.answers,
            confirmed: Arc::new(Mutex::new(confirmed)),
            swallowed_saves: Arc::new(AtomicU64::new(0)),
            attachment: None,
        })
    }

    /// The test being taken
    pub fn test(&self) -> &Test {
        &self.test
    }

    /// Server-side id of the response record
    pub fn response_id(&self) -> i64 {
        self.response_id
    }

    /// Current session phase
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Current 0-based question index
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.test.questions.len()
    }

    /// The question at the current index
    pub fn current_question(&self) -> &Question {
        &self.test.questions[self.index]
    }

    pub fn is_last_question(&self) -> bool {
        self.index == self.question_count() - 1
    }

    /// The local answer map
    pub fn answers(&self) -> &HashMap<i64, AnswerValue> {
        &self.answers
    }

    /// The local answer for one question, if any
    pub fn answer(&self, question_id: i64) -> Option<&AnswerValue> {
        self.answers.get(&question_id)
    }

    /// The pending attachment, if any
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// How many auto-save failures have been swallowed so far
    pub fn autosave_failures(&self) -> u64 {
        self.swallowed_saves.load(Ordering::Relaxed)
    }

    /// True when a non-empty answer exists for the question
    fn has_answer(&self, question_id: i64) -> bool {
        self.answers
            .get(&question_id)
            .is_some_and(|value| !value.is_empty())
    }

    fn require_in_progress(&self, operation: &str) -> Result<(), SessionError> {
        if self.phase == SessionPhase::InProgress {
            Ok(())
        } else {
            debug!(operation, phase = self.phase.name(), "operation refused");
            Err(SessionError::InvalidState {
                expected: "InProgress".to_string(),
                actual: self.phase.name().to_string(),
            })
        }
    }

    fn check_required(&self, question: &Question) -> Result<(), ValidationError> {
        if question.required && !self.has_answer(question.id) {
            Err(ValidationError {
                question_id: question.id,
            })
        } else {
            Ok(())
        }
    }

    /// Record an answer locally and issue a best-effort persist call.
    ///
    /// The local update is synchronous and always wins; the persist call
    /// runs in the background and its failure is logged, counted, and
    /// swallowed. Rapid edits are not coalesced: each edit issues its own
    /// call, which is safe because the backend upsert is last-write-wins
    /// per question id.
    pub fn set_answer(
        &mut self,
        question_id: i64,
        value: impl Into<AnswerValue>,
    ) -> Result<(), SessionError> {
        self.require_in_progress("set_answer")?;

        let value = value.into();
        self.answers.insert(question_id, value.clone());
        self.confirmed.lock().unwrap().remove(&question_id);

        let api = Arc::clone(&self.api);
        let response_id = self.response_id;
        let confirmed = Arc::clone(&self.confirmed);
        let swallowed = Arc::clone(&self.swallowed_saves);
        tokio::spawn(async move {
            match api.submit_answer(response_id, question_id, &value).await {
                Ok(()) => {
                    confirmed.lock().unwrap().insert(question_id);
                }
                Err(e) => {
                    swallowed.fetch_add(1, Ordering::Relaxed);
                    warn!(question_id, error = %e, "auto-save failed, keeping local answer");
                }
            }
        });

        Ok(())
    }

    /// Add or remove one option label from a checkbox answer
    pub fn toggle_choice(&mut self, question_id: i64, option: &str) -> Result<(), SessionError> {
        let mut selected = self
            .answers
            .get(&question_id)
            .map(|value| value.selections().to_vec())
            .unwrap_or_default();

        match selected.iter().position(|o| o == option) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(option.to_string()),
        }

        self.set_answer(question_id, selected)
    }

    /// Advance to the next question.
    ///
    /// Refused while the current question is required and unanswered; a
    /// no-op at the end of the sequence.
    pub fn go_next(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("go_next")?;
        self.check_required(self.current_question())?;
        if self.index + 1 < self.question_count() {
            self.index += 1;
        }
        Ok(())
    }

    /// Go back to the previous question.
    ///
    /// Refused while the current question is required and unanswered; a
    /// no-op at the start of the sequence.
    pub fn go_previous(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("go_previous")?;
        self.check_required(self.current_question())?;
        self.index = self.index.saturating_sub(1);
        Ok(())
    }

    /// Stage an image attachment, replacing any previous one.
    ///
    /// Purely local until finalize.
    pub fn attach_image(&mut self, attachment: Attachment) -> Result<(), SessionError> {
        self.require_in_progress("attach_image")?;
        debug!(
            file_name = %attachment.file_name,
            size = attachment.size(),
            "attachment staged"
        );
        self.attachment = Some(attachment);
        Ok(())
    }

    /// Finalize the session.
    ///
    /// Runs the reconciliation pass first: every answer present locally
    /// but not confirmed saved is persisted and awaited, so nothing set
    /// during the session is silently lost to a failed auto-save. Then
    /// the pending attachment is uploaded (which completes the response
    /// server-side) or, absent one, the plain complete call is issued.
    ///
    /// On failure the local session data is retained and the engine moves
    /// to `Failed`; call [`retry`](Self::retry) to return to `InProgress`
    /// and finalize again.
    pub async fn finalize(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("finalize")?;

        let last = self
            .test
            .questions
            .last()
            .expect("engine constructed with at least one question");
        self.check_required(last)?;

        self.phase = SessionPhase::Submitting;

        match self.run_finalize().await {
            Ok(()) => {
                info!(response_id = self.response_id, "assessment completed");
                self.phase = SessionPhase::Completed;
                Ok(())
            }
            Err(e) => {
                warn!(response_id = self.response_id, error = %e, "finalize failed");
                self.phase = SessionPhase::Failed {
                    message: e.to_string(),
                };
                Err(SessionError::Api(e))
            }
        }
    }

    /// Return to `InProgress` after a finalize failure
    pub fn retry(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Failed { .. } => {
                self.phase = SessionPhase::InProgress;
                Ok(())
            }
            _ => Err(SessionError::InvalidState {
                expected: "Failed".to_string(),
                actual: self.phase.name().to_string(),
            }),
        }
    }

    async fn run_finalize(&self) -> Result<(), ApiError> {
        // Reconciliation pass: persist every unconfirmed local answer,
        // in question order, awaiting each call.
        let unconfirmed: Vec<(i64, AnswerValue)> = {
            let confirmed = self.confirmed.lock().unwrap();
            self.test
                .questions
                .iter()
                .filter(|q| !confirmed.contains(&q.id))
                .filter_map(|q| self.answers.get(&q.id).map(|v| (q.id, v.clone())))
                .collect()
        };

        if !unconfirmed.is_empty() {
            info!(
                count = unconfirmed.len(),
                "reconciling unsaved answers before completion"
            );
        }
        for (question_id, value) in unconfirmed {
            self.api
                .submit_answer(self.response_id, question_id, &value)
                .await?;
            self.confirmed.lock().unwrap().insert(question_id);
        }

        match &self.attachment {
            Some(attachment) => self.api.upload_image(self.response_id, attachment).await,
            None => self.api.complete(self.response_id).await,
        }
    }
}
