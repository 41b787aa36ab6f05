use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::dto::employee_dto::EmployeeResponse;
use crate::middleware::auth::auth_guard;
use crate::middleware::role::require_company_or_employee;
use crate::models::auth::AuthenticatedUser;
use crate::services::employee_service::EmployeeService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_employee_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/current", get(get_current_employee))
        .route_layer(middleware::from_fn(require_company_or_employee))
        .route_layer(middleware::from_fn_with_state(state, auth_guard))
}

async fn get_current_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee =
        EmployeeService::new(state.pool.clone(), &state.config, state.mail.clone())
            .get_current(actor.id)
            .await?;
    Ok(Json(employee))
}
