//! Activity audit log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One append-only audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Action kind, e.g. "ORDER_CREATE", "INTAKE_CREATE"
    pub action_kind: String,
    pub description: String,
}
