//! HTTP implementation of the ApiBackend contract
//!
//! Attaches the stored bearer token to every authenticated request and
//! maps status codes onto the `ApiError` taxonomy. This layer never
//! clears the identity store or navigates; a 401 becomes a typed
//! `Unauthorized` for the top-level handler to act on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::traits::{ApiBackend, LoginOutcome, LoginRequest, StartedSession, TenantRef};
use crate::error::ApiError;
use crate::identity::{Identity, IdentityStore, Role};
use crate::models::{AnswerValue, Attachment, Response, TestSummary};

/// Default request timeout, matching the backend's expectations
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// ApiBackend backed by reqwest
pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
    store: Arc<IdentityStore>,
}

/// The backend's `{"error": ...}` envelope on failures
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct RawLogin {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<RawIdentity>,
    #[serde(default)]
    admin: Option<RawIdentity>,
    #[serde(default)]
    tenant: Option<RawIdentity>,
    #[serde(default)]
    password_reset_required: bool,
    #[serde(default)]
    user_id: Option<i64>,
}

#[derive(Deserialize)]
struct RawIdentity {
    id: i64,
    name: String,
    email: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    tenant_id: Option<i64>,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
struct TestsEnvelope {
    tests: Vec<TestSummary>,
}

#[derive(Deserialize)]
struct ResponsesEnvelope {
    responses: Vec<Response>,
}

impl HttpBackend {
    /// Create a backend against a base URL like `http://localhost:5000/api`
    pub fn new(
        base_url: &str,
        timeout: Duration,
        store: Arc<IdentityStore>,
    ) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url.trim_end_matches('/'))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client with static config");
        Ok(Self { http, base, store })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    /// Attach the stored bearer token, if present
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.store.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Prefer the backend's error envelope; fall back to the status line
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());

        match status.as_u16() {
            401 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound(message)),
            code => Err(ApiError::Server {
                status: code,
                message,
            }),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn identity_from_raw(role: Role, raw: RawIdentity) -> Identity {
        Identity {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            role,
            sub_role: if role == Role::User { raw.role } else { None },
            tenant_id: raw.tenant_id,
            is_active: raw.is_active,
        }
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError> {
        let url = match (request.role, &request.tenant) {
            (Role::User, Some(TenantRef::Slug(slug))) => {
                self.endpoint(&format!("user/login/{}", slug))
            }
            (role, _) => self.endpoint(&format!("{}/login", role)),
        };

        let mut body = serde_json::json!({
            "email": request.email,
            "password": request.password,
        });
        if let (Role::User, Some(TenantRef::Id(tenant_id))) = (request.role, &request.tenant) {
            body["tenant_id"] = serde_json::json!(tenant_id);
        }

        debug!(role = %request.role, "logging in");
        let response = self.send(self.http.post(&url).json(&body)).await?;
        let raw: RawLogin = Self::decode(response).await?;

        if raw.password_reset_required {
            let user_id = raw
                .user_id
                .ok_or_else(|| ApiError::Decode("reset response missing user_id".to_string()))?;
            return Ok(LoginOutcome::PasswordResetRequired { user_id });
        }

        let token = raw
            .token
            .ok_or_else(|| ApiError::Decode("login response missing token".to_string()))?;
        let record = match request.role {
            Role::Admin => raw.admin,
            Role::Tenant => raw.tenant,
            Role::User => raw.user,
        }
        .ok_or_else(|| ApiError::Decode("login response missing identity record".to_string()))?;

        Ok(LoginOutcome::Success {
            token,
            identity: Self::identity_from_raw(request.role, record),
        })
    }

    async fn list_tests(&self) -> Result<Vec<TestSummary>, ApiError> {
        let url = self.endpoint("test/tests");
        let response = self.send(self.authed(self.http.get(&url))).await?;
        let envelope: TestsEnvelope = Self::decode(response).await?;
        Ok(envelope.tests)
    }

    async fn start_test(&self, test_id: i64) -> Result<StartedSession, ApiError> {
        let url = self.endpoint(&format!("test/tests/{}/start", test_id));
        let response = self.send(self.authed(self.http.post(&url))).await?;
        Self::decode(response).await
    }

    async fn submit_answer(
        &self,
        response_id: i64,
        question_id: i64,
        value: &AnswerValue,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("test/responses/{}/answers", response_id));
        let body = serde_json::json!({
            "question_id": question_id,
            "answer": value,
        });
        self.send(self.authed(self.http.post(&url).json(&body)))
            .await?;
        Ok(())
    }

    async fn upload_image(
        &self,
        response_id: i64,
        attachment: &Attachment,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("test/responses/{}/upload-image", response_id));
        let part = multipart::Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.mime)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form = multipart::Form::new().part("image", part);

        self.send(self.authed(self.http.post(&url).multipart(form)))
            .await?;
        Ok(())
    }

    async fn complete(&self, response_id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("test/responses/{}/complete", response_id));
        self.send(self.authed(self.http.post(&url))).await?;
        Ok(())
    }

    async fn list_responses(&self) -> Result<Vec<Response>, ApiError> {
        let url = self.endpoint("test/responses");
        let response = self.send(self.authed(self.http.get(&url))).await?;
        let envelope: ResponsesEnvelope = Self::decode(response).await?;
        Ok(envelope.responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend(dir: &TempDir) -> HttpBackend {
        let store = Arc::new(IdentityStore::open(dir.path()).unwrap());
        HttpBackend::new("http://localhost:5000/api/", DEFAULT_TIMEOUT, store).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let dir = TempDir::new().unwrap();
        let api = backend(&dir);
        assert_eq!(
            api.endpoint("test/tests"),
            "http://localhost:5000/api/test/tests"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(IdentityStore::open(dir.path()).unwrap());
        assert!(HttpBackend::new("not a url", DEFAULT_TIMEOUT, store).is_err());
    }

    #[test]
    fn raw_login_parses_user_shape() {
        let json = r#"{
            "message": "Login successful",
            "token": "jwt-abc",
            "user": {"id": 4, "name": "Ada", "email": "ada@example.com",
                     "role": "employee", "tenant_id": 2, "is_active": true}
        }"#;
        let raw: RawLogin = serde_json::from_str(json).unwrap();
        let identity = HttpBackend::identity_from_raw(Role::User, raw.user.unwrap());

        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.sub_role.as_deref(), Some("employee"));
        assert_eq!(identity.tenant_id, Some(2));
    }

    #[test]
    fn raw_login_parses_reset_required_shape() {
        let json = r#"{"message": "Password reset required",
                       "password_reset_required": true, "user_id": 9, "temp_login": true}"#;
        let raw: RawLogin = serde_json::from_str(json).unwrap();
        assert!(raw.password_reset_required);
        assert_eq!(raw.user_id, Some(9));
    }
}
