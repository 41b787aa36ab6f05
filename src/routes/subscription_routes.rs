use axum::{
    extract::State,
    middleware,
    routing::{get, patch},
    Extension, Json, Router,
};

use crate::dto::subscription_dto::{
    BillingInfoResponse, ChangePlanRequest, DowngradeResponse, UpgradeResponse,
};
use crate::middleware::auth::auth_guard;
use crate::middleware::role::require_company;
use crate::models::auth::AuthenticatedUser;
use crate::services::subscription_service::SubscriptionService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_subscription_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/upgrade", patch(upgrade_subscription))
        .route("/downgrade", patch(downgrade_subscription))
        .route("/billing-info", get(get_billing_info))
        .route_layer(middleware::from_fn(require_company))
        .route_layer(middleware::from_fn_with_state(state, auth_guard))
}

async fn upgrade_subscription(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<ChangePlanRequest>,
) -> Result<Json<UpgradeResponse>, AppError> {
    let response = SubscriptionService::new(state.pool.clone())
        .upgrade(actor.id, request.subscription_plan)
        .await?;
    Ok(Json(response))
}

async fn downgrade_subscription(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<ChangePlanRequest>,
) -> Result<Json<DowngradeResponse>, AppError> {
    let response = SubscriptionService::new(state.pool.clone())
        .downgrade(actor.id, request.subscription_plan)
        .await?;
    Ok(Json(response))
}

async fn get_billing_info(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<BillingInfoResponse>, AppError> {
    let response = SubscriptionService::new(state.pool.clone())
        .billing_info(actor.id)
        .await?;
    Ok(Json(response))
}
