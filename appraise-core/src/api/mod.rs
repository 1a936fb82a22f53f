//! Backend API abstraction

pub mod http;
pub mod mock;
pub mod traits;

// Re-export key types for convenience
pub use http::{DEFAULT_TIMEOUT, HttpBackend};
pub use mock::MockApi;
pub use traits::{ApiBackend, LoginOutcome, LoginRequest, StartedSession, TenantRef};
