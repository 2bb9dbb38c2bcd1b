//! Activity audit log service
//!
//! Appends one row per recorded action. Writes are best-effort and happen in
//! their own transaction after the primary mutation has committed; a failed
//! append is logged and swallowed so it never rolls back or fails the caller.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::ActivityLog;

/// Action kinds recorded in the audit trail
pub mod actions {
    pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
    pub const FRUIT_CREATE: &str = "FRUIT_CREATE";
    pub const FRUIT_UPDATE: &str = "FRUIT_UPDATE";
    pub const FRUIT_DELETE: &str = "FRUIT_DELETE";
    pub const SUPPLIER_CREATE: &str = "SUPPLIER_CREATE";
    pub const SUPPLIER_UPDATE: &str = "SUPPLIER_UPDATE";
    pub const SUPPLIER_DELETE: &str = "SUPPLIER_DELETE";
    pub const CUSTOMER_CREATE: &str = "CUSTOMER_CREATE";
    pub const CUSTOMER_UPDATE: &str = "CUSTOMER_UPDATE";
    pub const CUSTOMER_DELETE: &str = "CUSTOMER_DELETE";
    pub const INTAKE_CREATE: &str = "INTAKE_CREATE";
    pub const ORDER_CREATE: &str = "ORDER_CREATE";
    pub const ORDER_STATUS_UPDATE: &str = "ORDER_STATUS_UPDATE";
    pub const ORDER_DELETE: &str = "ORDER_DELETE";
}

/// Audit service for the append-only activity trail
#[derive(Clone)]
pub struct AuditService {
    db: PgPool,
}

impl AuditService {
    /// Create a new AuditService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append an audit entry; never propagates an error
    pub async fn record(&self, user_id: Uuid, action_kind: &str, description: String) {
        let result = sqlx::query(
            "INSERT INTO activity_logs (user_id, action_kind, description) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(action_kind)
        .bind(&description)
        .execute(&self.db)
        .await;

        if let Err(err) = result {
            tracing::warn!(
                action_kind,
                %user_id,
                "Failed to record activity log: {}",
                err
            );
        }
    }

    /// List recent activity, newest first
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<ActivityLog>> {
        let rows = sqlx::query_as::<_, (Uuid, Uuid, chrono::DateTime<chrono::Utc>, String, String)>(
            r#"
            SELECT id, user_id, occurred_at, action_kind, description
            FROM activity_logs
            ORDER BY occurred_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, user_id, occurred_at, action_kind, description)| ActivityLog {
                id,
                user_id,
                occurred_at,
                action_kind,
                description,
            })
            .collect())
    }
}
