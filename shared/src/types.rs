//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// User roles recognized by the system
///
/// The role claim carried in JWT tokens maps to one of these variants.
/// Authorization checks compare against them explicitly at the start of
/// each gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    #[serde(rename = "Warehouse Staff")]
    WarehouseStaff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::WarehouseStaff => "Warehouse Staff",
        }
    }

    /// Parse a role name as stored in the database / token claim
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "Admin" => Some(Role::Admin),
            "Manager" => Some(Role::Manager),
            "Warehouse Staff" => Some(Role::WarehouseStaff),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic message response echoed by mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [Role::Admin, Role::Manager, Role::WarehouseStaff] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert_eq!(Role::parse("Superuser"), None);
        assert_eq!(Role::parse("admin"), None);
    }
}
