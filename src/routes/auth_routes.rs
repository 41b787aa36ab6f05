use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::dto::auth_dto::{
    ConfirmEmailQuery, ConfirmEmailResponse, RequestResetPasswordRequest, ResetPasswordRequest,
    SetPasswordRequest, SignInRequest, SignInResponse, SignUpRequest,
};
use crate::dto::company_dto::CompanyResponse;
use crate::dto::ApiResponse;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/confirm-email", get(confirm_email))
        .route("/set-password", post(set_password))
        .route("/request-reset-password", post(request_reset_password))
        .route("/reset-password", post(reset_password))
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.pool.clone(), &state.config, state.mail.clone())
}

async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    request.validate()?;
    let company = auth_service(&state).sign_up(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        company,
        "Please check your email and activate your account".to_string(),
    )))
}

async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    request.validate()?;
    let response = auth_service(&state).sign_in(request).await?;
    Ok(Json(response))
}

async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<ConfirmEmailQuery>,
) -> Result<Json<ConfirmEmailResponse>, AppError> {
    let response = auth_service(&state).confirm_email(&query.token).await?;
    Ok(Json(response))
}

async fn set_password(
    State(state): State<AppState>,
    Json(request): Json<SetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let message = auth_service(&state)
        .set_password(&request.token, &request.password)
        .await?;
    Ok(Json(ApiResponse::message_only(message)))
}

async fn request_reset_password(
    State(state): State<AppState>,
    Json(request): Json<RequestResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let message = auth_service(&state)
        .request_reset_password(&request.email)
        .await?;
    Ok(Json(ApiResponse::message_only(message)))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let message = auth_service(&state)
        .reset_password(&request.token, &request.password)
        .await?;
    Ok(Json(ApiResponse::message_only(message)))
}
