//! Route definitions for the fruit inventory backend

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
///
/// The state is threaded into the auth middleware so token validation uses
/// the configured JWT secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (mixed public/protected)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - fruit type master data
        .nest("/fruits", fruit_routes(state.clone()))
        // Protected routes - supplier master data
        .nest("/suppliers", supplier_routes(state.clone()))
        // Protected routes - customer master data
        .nest("/customers", customer_routes(state.clone()))
        // Protected routes - intake transactions
        .nest("/intakes", intake_routes(state.clone()))
        // Protected routes - stock batches and shelf-life monitoring
        .nest("/batches", batch_routes(state.clone()))
        // Protected routes - outbound orders
        .nest("/orders", order_routes(state.clone()))
        // Protected routes - activity log
        .nest("/activity", activity_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .merge(protected_auth_routes(state))
}

/// Authentication routes requiring a valid access token
fn protected_auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me))
        .route("/logout", post(handlers::logout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Fruit type management routes (protected)
fn fruit_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_fruits).post(handlers::create_fruit))
        .route(
            "/:fruit_id",
            get(handlers::get_fruit)
                .put(handlers::update_fruit)
                .delete(handlers::delete_fruit),
        )
        .route("/:fruit_id/consistency", get(handlers::check_consistency))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Supplier management routes (protected)
fn supplier_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Customer management routes (protected)
fn customer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_customers).post(handlers::create_customer))
        .route(
            "/:customer_id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Intake transaction routes (protected)
fn intake_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_intakes).post(handlers::create_intake))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Stock batch routes (protected)
fn batch_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_batches))
        .route("/available", get(handlers::list_available_batches))
        .route("/shelf-life", get(handlers::shelf_life_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Outbound order routes (protected)
fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:order_id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route("/:order_id/status", put(handlers::update_order_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Activity log routes (protected)
fn activity_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_activity))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
