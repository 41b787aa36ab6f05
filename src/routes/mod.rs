pub mod auth_routes;
pub mod company_routes;
pub mod employee_routes;
pub mod file_routes;
pub mod subscription_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Ensambla el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/company", company_routes::create_company_router(state.clone()))
        .nest("/employee", employee_routes::create_employee_router(state.clone()))
        .nest("/file", file_routes::create_file_router(state.clone()))
        .nest(
            "/subscription",
            subscription_routes::create_subscription_router(state.clone()),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "company-management",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
