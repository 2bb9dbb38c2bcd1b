//! Stock batch HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::LedgerService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailableBatchQuery {
    pub fruit_type_id: Option<Uuid>,
}

/// List all stock batches in FIFO order
pub async fn list_batches(State(state): State<AppState>) -> impl IntoResponse {
    let service = LedgerService::new(state.db.clone());

    match service.list_all().await {
        Ok(batches) => {
            (StatusCode::OK, Json(serde_json::json!({ "batches": batches }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// List batches with remaining stock, oldest first
pub async fn list_available_batches(
    State(state): State<AppState>,
    Query(query): Query<AvailableBatchQuery>,
) -> impl IntoResponse {
    let service = LedgerService::new(state.db.clone());

    match service.list_available(query.fruit_type_id).await {
        Ok(batches) => {
            (StatusCode::OK, Json(serde_json::json!({ "batches": batches }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Shelf-life report over batches with remaining stock
pub async fn shelf_life_report(State(state): State<AppState>) -> impl IntoResponse {
    let service = LedgerService::new(state.db.clone());

    match service.shelf_life_report().await {
        Ok(batches) => {
            (StatusCode::OK, Json(serde_json::json!({ "batches": batches }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Compare a fruit type's cached aggregate against its batch sum
pub async fn check_consistency(
    State(state): State<AppState>,
    Path(fruit_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LedgerService::new(state.db.clone());

    match service.check_consistency(fruit_id).await {
        Ok(check) => (StatusCode::OK, Json(check)).into_response(),
        Err(e) => e.into_response(),
    }
}
