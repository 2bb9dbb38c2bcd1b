//! User account models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// Public view of a user account (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
}
