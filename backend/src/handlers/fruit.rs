//! Fruit type management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::audit::actions;
use crate::services::fruit::{CreateFruitInput, FruitService, UpdateFruitInput};
use crate::services::AuditService;
use crate::AppState;

/// List all fruit types with their cached aggregate stock
pub async fn list_fruits(State(state): State<AppState>) -> impl IntoResponse {
    let service = FruitService::new(state.db.clone());

    match service.list().await {
        Ok(fruits) => (StatusCode::OK, Json(serde_json::json!({ "fruits": fruits }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific fruit type
pub async fn get_fruit(
    State(state): State<AppState>,
    Path(fruit_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FruitService::new(state.db.clone());

    match service.get(fruit_id).await {
        Ok(fruit) => (StatusCode::OK, Json(fruit)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Register a new fruit type
pub async fn create_fruit(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateFruitInput>,
) -> impl IntoResponse {
    let service = FruitService::new(state.db.clone());

    match service.create(input).await {
        Ok(fruit) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::FRUIT_CREATE,
                    format!("Created fruit type '{}'", fruit.name),
                )
                .await;
            (StatusCode::CREATED, Json(fruit)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Update a fruit type
pub async fn update_fruit(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(fruit_id): Path<Uuid>,
    Json(input): Json<UpdateFruitInput>,
) -> impl IntoResponse {
    let service = FruitService::new(state.db.clone());

    match service.update(fruit_id, input).await {
        Ok(fruit) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::FRUIT_UPDATE,
                    format!("Updated fruit type '{}'", fruit.name),
                )
                .await;
            (StatusCode::OK, Json(fruit)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Delete a fruit type
pub async fn delete_fruit(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(fruit_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FruitService::new(state.db.clone());

    match service.delete(fruit_id).await {
        Ok(fruit) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::FRUIT_DELETE,
                    format!("Deleted fruit type '{}'", fruit.name),
                )
                .await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => e.into_response(),
    }
}
