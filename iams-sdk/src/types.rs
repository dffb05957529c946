use serde::{Deserialize, Serialize};

/// A tenant as returned by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for creating or renaming a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRequest {
    pub name: String,
}

/// A user; tenant membership listings use the same shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Request body for creating or updating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub enabled: bool,
}

impl UserRequest {
    /// Enabled user whose email is derived from the username
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        let email = crate::naming::email_for(&username);
        Self {
            username,
            email,
            enabled: true,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A tenant role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client_role: Option<bool>,
    #[serde(default)]
    pub container_id: Option<String>,
}

/// Request body for creating or updating a role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub client_role: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

/// Role reference used by role assignment payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: String,
    pub name: String,
}

impl From<&Role> for RoleRef {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.clone(),
            name: role.name.clone(),
        }
    }
}

/// User reference used when assigning users to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
}

/// An authorization scope inside a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for creating or renaming a scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRequest {
    pub name: String,
}

/// A protected resource inside a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Scope ids the resource is bound to
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Request body for creating or updating a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub name: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Grant of scopes on a resource to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub user_id: String,
    pub scopes: Vec<String>,
}

/// One entry of a user's effective permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub resource_id: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Result of adding a user to a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// 201: membership created
    Added,
    /// 409: the user was already a member
    AlreadyMember,
}
