//! Guards de rol
//!
//! Cada guard está parametrizado por el conjunto de roles admitidos y se
//! apoya en el actor que inyectó el guard de autenticación. Se componen
//! por AND en el orden en que se apilan, con corte en el primer fallo.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::models::auth::{AuthenticatedUser, Role};
use crate::utils::errors::AppError;

fn check_role(request: &Request, allowed: &[Role]) -> Result<(), AppError> {
    let actor = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| {
            AppError::Unauthorized("Unauthorized access: No token provided".to_string())
        })?;

    if !allowed.contains(&actor.role) {
        return Err(AppError::Forbidden(
            "Access denied: Insufficient role".to_string(),
        ));
    }

    Ok(())
}

/// Solo companies
pub async fn require_company(request: Request, next: Next) -> Result<Response, AppError> {
    check_role(&request, &[Role::Company])?;
    Ok(next.run(request).await)
}

/// Companies y employees
pub async fn require_company_or_employee(
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&request, &[Role::Company, Role::Employee])?;
    Ok(next.run(request).await)
}
