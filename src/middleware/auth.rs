//! Guard de autenticación
//!
//! Extrae el bearer token, lo decodifica y exige `is_active` en el
//! payload; en caso contrario la request muere aquí con Unauthorized.
//! Inyecta el actor autenticado en las extensions para los guards y
//! handlers posteriores.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::models::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extrae el token del header Authorization
pub fn bearer_token(request: &Request) -> Result<&str, AppError> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Unauthorized access: No token provided".to_string()))
}

pub async fn auth_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let claims = state.tokens.decode(token)?;

    // Los tokens de activación/reset no llevan is_active y no valen
    // como sesión
    if claims.is_active != Some(true) {
        return Err(AppError::Unauthorized(
            "Unauthorized access: Inactive user".to_string(),
        ));
    }

    let actor = AuthenticatedUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        company_id: claims.company_id,
        is_active: true,
    };
    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}
