//! Supplier management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::audit::actions;
use crate::services::supplier::{CreateSupplierInput, SupplierService, UpdateSupplierInput};
use crate::services::AuditService;
use crate::AppState;

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.list().await {
        Ok(suppliers) => {
            (StatusCode::OK, Json(serde_json::json!({ "suppliers": suppliers }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.get(supplier_id).await {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Register a new supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.create(input).await {
        Ok(supplier) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::SUPPLIER_CREATE,
                    format!("Created supplier '{}'", supplier.name),
                )
                .await;
            (StatusCode::CREATED, Json(supplier)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.update(supplier_id, input).await {
        Ok(supplier) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::SUPPLIER_UPDATE,
                    format!("Updated supplier '{}'", supplier.name),
                )
                .await;
            (StatusCode::OK, Json(supplier)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.delete(supplier_id).await {
        Ok(supplier) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::SUPPLIER_DELETE,
                    format!("Deleted supplier '{}'", supplier.name),
                )
                .await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => e.into_response(),
    }
}
