//! Intake transaction HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::middleware::{require_role, CurrentUser};
use crate::services::audit::actions;
use crate::services::intake::{CreateIntakeInput, IntakeService};
use crate::services::AuditService;
use crate::AppState;
use shared::types::Role;

/// List intake transactions with their batches
pub async fn list_intakes(State(state): State<AppState>) -> impl IntoResponse {
    let service = IntakeService::new(state.db.clone());

    match service.list().await {
        Ok(intakes) => {
            (StatusCode::OK, Json(serde_json::json!({ "intakes": intakes }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Record an intake transaction, creating one stock batch per item
pub async fn create_intake(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateIntakeInput>,
) -> impl IntoResponse {
    if let Err(e) = require_role(&current_user.0, &[Role::Admin, Role::WarehouseStaff]) {
        return e.into_response();
    }

    let service = IntakeService::new(state.db.clone());

    match service.create(current_user.0.user_id, input).await {
        Ok(created) => {
            AuditService::new(state.db.clone())
                .record(
                    current_user.0.user_id,
                    actions::INTAKE_CREATE,
                    format!(
                        "Recorded intake from '{}' with {} batch(es)",
                        created.supplier_name,
                        created.batch_ids.len()
                    ),
                )
                .await;
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
