//! appraise-core: Core library for the appraise assessment client
//!
//! This crate provides the foundational components for appraise:
//!
//! - **Identity store** - [`IdentityStore`] for the persisted bearer token
//!   and cached identity record
//! - **Access guard** - [`can_enter`] for role-scoped entry decisions
//! - **API backend** - [`ApiBackend`] trait with [`HttpBackend`] and
//!   [`MockApi`] implementations
//! - **Session engine** - [`SessionLoader`] and [`AssessmentEngine`] for
//!   the interactive assessment state machine
//! - **Answer renderer** - [`render_input`] mapping questions to widgets
//!
//! # Architecture
//!
//! ```text
//! AccessGuard ──reads──▶ IdentityStore
//!      │
//!      ▼ allow
//! SessionLoader ──start/resume──▶ ApiBackend
//!      │
//!      ▼ seeds
//! AssessmentEngine ──auto-save / finalize──▶ ApiBackend
//!      │
//!      ▼ per render
//! render_input(question, answer) ──▶ WidgetSpec
//! ```
//!
//! The engine's local state (current index, answer map) always updates
//! synchronously; persistence is best-effort per edit with a
//! reconciliation pass at finalize time. The network layer never clears
//! the identity store or navigates: a 401 surfaces as
//! [`ApiError::Unauthorized`] for the top-level caller to handle.

pub mod api;
pub mod error;
pub mod guard;
pub mod identity;
pub mod models;
pub mod render;
pub mod session;

// Re-export key types for convenience
pub use api::{
    ApiBackend, HttpBackend, LoginOutcome, LoginRequest, MockApi, StartedSession, TenantRef,
};
pub use error::{ApiError, SessionError, StoreError, ValidationError};
pub use guard::{AccessDecision, can_enter};
pub use identity::{Identity, IdentityStore, Role};
pub use models::{AnswerValue, Attachment, Question, QuestionKind, Response, Test, TestSummary};
pub use render::{RANGE_MAX, RANGE_MIN, WidgetSpec, render_input};
pub use session::{AssessmentEngine, SessionLoader, SessionPhase};
