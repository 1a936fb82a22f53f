//! Role-scoped access guard
//!
//! A pure decision consulted before entering any role-restricted flow.
//! It holds no state of its own beyond reading the identity store and is
//! re-evaluated on every entry.

use crate::identity::{IdentityStore, Role};

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The caller's stored identity matches the required role
    Allow,
    /// No usable credential; the caller should log in for this role
    RedirectToLogin(Role),
    /// Authenticated, but as a different role. Cross-role access is a
    /// hard deny: it is not retried or escalated.
    RedirectHome,
}

/// Decide whether the current session may enter a view restricted to
/// `required`.
pub fn can_enter(store: &IdentityStore, required: Role) -> AccessDecision {
    if !store.is_authenticated() {
        return AccessDecision::RedirectToLogin(required);
    }
    match store.identity() {
        Some(identity) if identity.role == required => AccessDecision::Allow,
        _ => AccessDecision::RedirectHome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use tempfile::TempDir;

    fn logged_in_store(dir: &TempDir, role: Role) -> IdentityStore {
        let store = IdentityStore::open(dir.path()).unwrap();
        store.set_token(Some("tok".to_string())).unwrap();
        store
            .set_identity(Some(Identity::new(1, "Ada", "ada@example.com", role)))
            .unwrap();
        store
    }

    #[test]
    fn no_credential_redirects_to_login_for_required_role() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::open(dir.path()).unwrap();

        assert_eq!(
            can_enter(&store, Role::Tenant),
            AccessDecision::RedirectToLogin(Role::Tenant)
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir, Role::User);

        assert_eq!(can_enter(&store, Role::User), AccessDecision::Allow);
    }

    #[test]
    fn cross_role_access_redirects_home() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir, Role::User);

        assert_eq!(can_enter(&store, Role::Admin), AccessDecision::RedirectHome);
    }

    #[test]
    fn token_without_identity_redirects_to_login() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::open(dir.path()).unwrap();
        store.set_token(Some("tok".to_string())).unwrap();

        assert_eq!(
            can_enter(&store, Role::User),
            AccessDecision::RedirectToLogin(Role::User)
        );
    }
}
