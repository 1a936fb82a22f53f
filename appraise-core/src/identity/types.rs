//! Identity and role types

use serde::{Deserialize, Serialize};

/// The guard dimension of an identity: which login surface it came from.
///
/// A `User` identity additionally carries a tenant-scoped sub-role
/// (employee, manager, sales, user), but route access is decided on this
/// coarse role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tenant,
    User,
}

impl Role {
    /// Path segment used by the login endpoints (`/{role}/login`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tenant => "tenant",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cached identity record returned by a login endpoint.
///
/// Replaced wholesale on login and cleared together with the token; it is
/// never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Which login surface produced this identity
    pub role: Role,
    /// Tenant-scoped sub-role for end users (employee, manager, sales, user)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Identity {
    /// Create a new identity with the given role
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            sub_role: None,
            tenant_id: None,
            is_active: true,
        }
    }

    /// Set the tenant id
    pub fn with_tenant(mut self, tenant_id: i64) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Set the tenant-scoped sub-role
    pub fn with_sub_role(mut self, sub_role: impl Into<String>) -> Self {
        self.sub_role = Some(sub_role.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_as_str_matches_login_paths() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Tenant.as_str(), "tenant");
        assert_eq!(Role::User.as_str(), "user");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Tenant).unwrap();
        assert_eq!(json, "\"tenant\"");
    }

    #[test]
    fn identity_builder_sets_fields() {
        let identity = Identity::new(3, "Ada", "ada@example.com", Role::User)
            .with_tenant(12)
            .with_sub_role("manager");

        assert_eq!(identity.id, 3);
        assert_eq!(identity.tenant_id, Some(12));
        assert_eq!(identity.sub_role, Some("manager".to_string()));
        assert!(identity.is_active);
    }

    #[test]
    fn identity_serialization_roundtrip() {
        let identity = Identity::new(1, "Ada", "ada@example.com", Role::Admin);
        let json = serde_json::to_string(&identity).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(identity, parsed);
    }
}
