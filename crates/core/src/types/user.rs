//! User records as exposed to the rest of the system.
//!
//! Credential storage and verification live behind the storefront's auth
//! service; this type is what the session and admin panel see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Roles are assigned explicitly at signup, never inferred
/// from the email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// A signed-up user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user may access the admin panel.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Admin).expect("serialize"), "admin");
        assert_eq!(
            serde_json::to_value(Role::Customer).expect("serialize"),
            "customer"
        );
    }

    #[test]
    fn only_admin_role_grants_admin() {
        let user = User {
            id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Not Actually Admin".to_string(),
            role: Role::Customer,
            created_at: Utc::now(),
        };
        // An "admin" email alone must not grant the role.
        assert!(!user.is_admin());
    }
}
