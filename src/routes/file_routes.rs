use axum::{
    extract::{Multipart, Path, State},
    middleware,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::file_dto::{
    AllowedEmployeesInput, FileListResponse, UpdateFilePermissionsRequest, UploadFileResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::auth_guard;
use crate::middleware::role::require_company_or_employee;
use crate::middleware::subscription::{payment_recency_guard, subscription_quota_guard};
use crate::models::auth::AuthenticatedUser;
use crate::services::file_service::FileService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_file_router(state: AppState) -> Router<AppState> {
    // La subida pasa además por los guards de cuota y de pago
    let upload = Router::new()
        .route("/upload", post(upload_file))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            payment_recency_guard,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            subscription_quota_guard,
        ));

    Router::new()
        .route("/", get(get_company_files))
        .route("/permissions", patch(update_file_permissions))
        .route("/:id", delete(delete_file))
        .merge(upload)
        .route_layer(middleware::from_fn(require_company_or_employee))
        .route_layer(middleware::from_fn_with_state(state, auth_guard))
}

fn file_service(state: &AppState) -> FileService {
    FileService::new(state.pool.clone(), state.storage.clone())
}

/// Campos del formulario multipart: `file`, `restricted` y cero o más
/// `allowed_employees`
struct UploadForm {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    restricted: bool,
    allowed_employees: Vec<String>,
}

async fn parse_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut restricted = false;
    let mut allowed_employees: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Error reading file: {}", e)))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("restricted") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field: {}", e)))?;
                restricted = value == "true";
            }
            Some("allowed_employees") | Some("allowedEmployees") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field: {}", e)))?;
                allowed_employees.push(value);
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    Ok(UploadForm {
        file_name,
        content_type,
        bytes,
        restricted,
        allowed_employees,
    })
}

async fn upload_file(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<Json<UploadFileResponse>, AppError> {
    let form = parse_upload_form(multipart).await?;

    let file_url = file_service(&state)
        .upload(
            &actor,
            &form.file_name,
            &form.content_type,
            form.bytes,
            form.restricted,
            form.allowed_employees,
        )
        .await?;

    Ok(Json(UploadFileResponse {
        message: "File uploaded successfully".to_string(),
        file_url,
    }))
}

async fn update_file_permissions(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateFilePermissionsRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let allowed = AllowedEmployeesInput::normalize(request.allowed_employees);

    file_service(&state)
        .update_permissions(&actor, request.file_id, request.restricted, allowed)
        .await?;

    Ok(Json(ApiResponse::message_only(
        "File permissions updated successfully".to_string(),
    )))
}

async fn delete_file(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    file_service(&state).delete(&actor, id).await?;
    Ok(Json(ApiResponse::message_only(
        "File deleted successfully".to_string(),
    )))
}

async fn get_company_files(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<FileListResponse>, AppError> {
    let response = file_service(&state).get_company_files(&actor).await?;
    Ok(Json(response))
}
