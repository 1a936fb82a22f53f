//! ApiBackend trait and request/response types
//!
//! The backend abstraction lets the session engine run against the real
//! HTTP backend or a scripted mock, and keeps the network layer free of
//! any navigation or identity-store side effects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::identity::{Identity, Role};
use crate::models::{AnswerValue, Attachment, Response, Test, TestSummary};

/// Tenant scoping for end-user login: an SEO-friendly slug or a numeric id
#[derive(Debug, Clone, PartialEq)]
pub enum TenantRef {
    Slug(String),
    Id(i64),
}

/// Credentials for one of the three login surfaces
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub role: Role,
    pub email: String,
    pub password: String,
    /// Only meaningful for `Role::User`
    pub tenant: Option<TenantRef>,
}

/// Result of a login attempt
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Authentication succeeded; token and identity record returned
    Success { token: String, identity: Identity },
    /// The account has a temporary password and must set a new one
    /// before it can be used
    PasswordResetRequired { user_id: i64 },
}

/// A started (or resumed) assessment session: the test definition plus
/// the caller's response record, as returned by the idempotent start call
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartedSession {
    pub test: Test,
    pub response: Response,
}

/// The backend contract consumed by the client
#[async_trait]
pub trait ApiBackend: Send + Sync {
    /// Authenticate against one of the role-specific login endpoints
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError>;

    /// Tests visible to the caller
    async fn list_tests(&self) -> Result<Vec<TestSummary>, ApiError>;

    /// Start or resume the caller's response for a test.
    ///
    /// The backend decides creation vs resumption; the client never does.
    async fn start_test(&self, test_id: i64) -> Result<StartedSession, ApiError>;

    /// Idempotent last-write-wins upsert of a single answer
    async fn submit_answer(
        &self,
        response_id: i64,
        question_id: i64,
        value: &AnswerValue,
    ) -> Result<(), ApiError>;

    /// Upload the attachment; the backend marks the response complete as
    /// part of the same operation
    async fn upload_image(&self, response_id: i64, attachment: &Attachment)
    -> Result<(), ApiError>;

    /// Complete the response without an attachment
    async fn complete(&self, response_id: i64) -> Result<(), ApiError>;

    /// The caller's response records
    async fn list_responses(&self) -> Result<Vec<Response>, ApiError>;
}
