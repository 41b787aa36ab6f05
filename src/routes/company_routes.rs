use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::company_dto::{CompanyDetailResponse, CompanyResponse, UpdateCompanyRequest};
use crate::dto::employee_dto::{CreateEmployeeRequest, EmployeeResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::auth_guard;
use crate::middleware::role::require_company;
use crate::middleware::subscription::{payment_recency_guard, subscription_quota_guard};
use crate::models::auth::AuthenticatedUser;
use crate::repositories::{CompanyRepository, EmployeeRepository, FileRepository};
use crate::services::employee_service::EmployeeService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router(state: AppState) -> Router<AppState> {
    // El alta de empleados pasa además por los guards de cuota y de pago
    let provisioning = Router::new()
        .route("/create-employee", post(create_employee))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            payment_recency_guard,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            subscription_quota_guard,
        ));

    Router::new()
        .route("/current", get(get_current_company))
        .route("/", patch(update_company).delete(remove_company))
        .route("/employees", get(get_employees))
        .route("/employee/:id", get(get_employee))
        .route("/employee/:id", delete(remove_employee))
        .merge(provisioning)
        .route_layer(middleware::from_fn(require_company))
        .route_layer(middleware::from_fn_with_state(state, auth_guard))
}

fn employee_service(state: &AppState) -> EmployeeService {
    EmployeeService::new(state.pool.clone(), &state.config, state.mail.clone())
}

async fn get_current_company(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<CompanyDetailResponse>, AppError> {
    let company = CompanyRepository::new(state.pool.clone())
        .find_by_id(actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let employees = EmployeeRepository::new(state.pool.clone())
        .find_all_in_company(actor.id)
        .await?;
    let files = FileRepository::new(state.pool.clone())
        .find_all_by_company(actor.id)
        .await?;

    Ok(Json(CompanyDetailResponse {
        company: company.into(),
        employees: employees.into_iter().map(EmployeeResponse::from).collect(),
        uploaded_files: files,
    }))
}

async fn update_company(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>, AppError> {
    request.validate()?;

    let repository = CompanyRepository::new(state.pool.clone());
    let company = repository
        .find_by_id(actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let updated = repository
        .update_profile(
            actor.id,
            request.name.as_deref().unwrap_or(&company.name),
            request.country.as_deref().unwrap_or(&company.country),
            request.industry.as_deref().unwrap_or(&company.industry),
        )
        .await?;

    Ok(Json(updated.into()))
}

async fn remove_company(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CompanyRepository::new(state.pool.clone())
        .delete(actor.id)
        .await?;
    Ok(Json(ApiResponse::message_only(
        "Company deleted successfully".to_string(),
    )))
}

async fn create_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, AppError> {
    request.validate()?;
    let employee = employee_service(&state)
        .add_employee(actor.id, request)
        .await?;
    Ok(Json(ApiResponse::success(employee)))
}

async fn get_employees(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let employees = employee_service(&state)
        .find_all_in_company(actor.id)
        .await?;
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = employee_service(&state)
        .find_in_company(id, actor.id)
        .await?;
    Ok(Json(employee))
}

async fn remove_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = employee_service(&state)
        .remove_in_company(id, actor.id)
        .await?;
    Ok(Json(ApiResponse::message_only(message)))
}
