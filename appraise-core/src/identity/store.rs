//! Persisted login session storage
//!
//! Two logical keys live here: the opaque bearer token and the cached
//! identity record. They are written and cleared together; a record with
//! one but not the other counts as not authenticated.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::identity::Identity;

/// Session file name inside the config directory
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
    identity: Option<Identity>,
}

/// File-backed store for the current login session.
///
/// All operations are synchronous and touch only the session file; there
/// is no network access here. `clear()` is invoked on explicit logout and
/// whenever the backend signals the credential invalid.
pub struct IdentityStore {
    state: RwLock<StoredSession>,
    file_path: PathBuf,
}

impl IdentityStore {
    /// Load the session from the config directory, or start empty
    pub fn open(config_dir: &Path) -> Result<Self, StoreError> {
        let file_path = config_dir.join(SESSION_FILE);

        let state = if file_path.exists() {
            let content = fs::read_to_string(&file_path)?;
            // A corrupt session file is treated as logged out, not fatal
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            StoredSession::default()
        };

        Ok(Self {
            state: RwLock::new(state),
            file_path,
        })
    }

    /// Replace the stored bearer token (`None` removes it)
    pub fn set_token(&self, token: Option<String>) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.token = token;
        }
        self.persist()
    }

    /// Replace the cached identity record (`None` removes it)
    pub fn set_identity(&self, identity: Option<Identity>) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.identity = identity;
        }
        self.persist()
    }

    /// The stored bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    /// The cached identity record, if any
    pub fn identity(&self) -> Option<Identity> {
        self.state
            .read()
            .expect("session lock poisoned")
            .identity
            .clone()
    }

    /// True only when both the token and the identity record are present.
    ///
    /// One key without the other is a half-cleared session and counts as
    /// logged out.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read().expect("session lock poisoned");
        state.token.is_some() && state.identity.is_some()
    }

    /// Remove both keys together
    pub fn clear(&self) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            *state = StoredSession::default();
        }
        debug!("identity store cleared");
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let state = self.state.read().expect("session lock poisoned");
        let content = serde_json::to_string_pretty(&*state)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use tempfile::TempDir;

    fn test_identity() -> Identity {
        Identity::new(1, "Ada", "ada@example.com", Role::User).with_tenant(4)
    }

    #[test]
    fn open_without_file_starts_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::open(dir.path()).unwrap();

        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.identity().is_none());
    }

    #[test]
    fn set_token_and_identity_authenticates() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::open(dir.path()).unwrap();

        store.set_token(Some("tok-123".to_string())).unwrap();
        assert!(!store.is_authenticated(), "token alone is not enough");

        store.set_identity(Some(test_identity())).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("tok-123".to_string()));
    }

    #[test]
    fn identity_alone_is_not_authenticated() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::open(dir.path()).unwrap();

        store.set_identity(Some(test_identity())).unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_removes_both_keys() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::open(dir.path()).unwrap();

        store.set_token(Some("tok".to_string())).unwrap();
        store.set_identity(Some(test_identity())).unwrap();
        store.clear().unwrap();

        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.identity().is_none());
    }

    #[test]
    fn session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = IdentityStore::open(dir.path()).unwrap();
            store.set_token(Some("tok".to_string())).unwrap();
            store.set_identity(Some(test_identity())).unwrap();
        }

        let reopened = IdentityStore::open(dir.path()).unwrap();
        assert!(reopened.is_authenticated());
        assert_eq!(reopened.identity().unwrap().email, "ada@example.com");
    }

    #[test]
    fn corrupt_session_file_is_treated_as_logged_out() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();

        let store = IdentityStore::open(dir.path()).unwrap();
        assert!(!store.is_authenticated());
    }
}
