//! Activity log HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::middleware::{require_role, CurrentUser};
use crate::services::AuditService;
use crate::AppState;
use shared::types::Role;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

/// List recent activity, newest first
pub async fn list_activity(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ActivityQuery>,
) -> impl IntoResponse {
    if let Err(e) = require_role(&current_user.0, &[Role::Admin, Role::Manager]) {
        return e.into_response();
    }

    let service = AuditService::new(state.db.clone());
    let limit = query.limit.unwrap_or(100).clamp(1, 500);

    match service.recent(limit).await {
        Ok(logs) => {
            (StatusCode::OK, Json(serde_json::json!({ "activity": logs }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
