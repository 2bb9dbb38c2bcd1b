//! Outbound order HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_role, CurrentUser};
use crate::services::audit::actions;
use crate::services::order::{CreateOrderInput, OrderService, UpdateStatusInput};
use crate::services::AuditService;
use crate::AppState;
use shared::types::Role;

/// List outbound orders
pub async fn list_orders(State(state): State<AppState>) -> impl IntoResponse {
    let service = OrderService::new(state.db.clone(), &state.config);

    match service.list().await {
        Ok(orders) => {
            (StatusCode::OK, Json(serde_json::json!({ "orders": orders }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get an order with its line items
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = OrderService::new(state.db.clone(), &state.config);

    match service.get(order_id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create an outbound order, consuming stock per line item
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> impl IntoResponse {
    if let Err(e) = require_role(&current_user.0, &[Role::Admin, Role::WarehouseStaff]) {
        return e.into_response();
    }

    let service = OrderService::new(state.db.clone(), &state.config);

    match service.create(current_user.0.user_id, input).await {
        Ok(created) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::ORDER_CREATE,
                    format!(
                        "Created order for '{}' with {} line item(s)",
                        created.customer_name, created.line_item_count
                    ),
                )
                .await;
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Transition an order to a new status
pub async fn update_order_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> impl IntoResponse {
    let service = OrderService::new(state.db.clone(), &state.config);

    match service.update_status(order_id, input.status).await {
        Ok(updated) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::ORDER_STATUS_UPDATE,
                    format!(
                        "Order {} moved from '{}' to '{}'",
                        updated.order_id, updated.previous_status, updated.status
                    ),
                )
                .await;
            (StatusCode::OK, Json(updated)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Delete an order, restoring its stock unless already cancelled
pub async fn delete_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = OrderService::new(state.db.clone(), &state.config);

    match service.delete(order_id).await {
        Ok(deleted) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::ORDER_DELETE,
                    format!("Deleted order {} for '{}'", deleted.id, deleted.customer_name),
                )
                .await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => e.into_response(),
    }
}
