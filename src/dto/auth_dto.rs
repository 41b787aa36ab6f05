//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request de registro de una company
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 50, message = "Name must have at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(
        length(min = 8, max = 20),
        custom = "validate_password_complexity"
    )]
    pub password: String,

    #[validate(length(min = 1, max = 20))]
    pub country: String,

    #[validate(length(min = 1, max = 20))]
    pub industry: String,
}

/// Mínimo una mayúscula, una minúscula, un dígito y un carácter especial
pub fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| "@$!%*?&".contains(c));

    if has_lowercase && has_uppercase && has_digit && has_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("password_complexity"))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Respuesta de sign-in: token de sesión, o mensaje informativo cuando un
/// employee inactivo aún debe activar su cuenta
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SignInResponse {
    Session { access_token: String },
    Info { message: String },
}

#[derive(Debug, Deserialize)]
pub struct ConfirmEmailQuery {
    pub token: String,
}

/// Respuesta de confirm-email: para un employee devuelve el token para que
/// el caller pida la contraseña definitiva; para una company no hay token
#[derive(Debug, Serialize)]
pub struct ConfirmEmailResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,

    #[validate(
        length(min = 8, max = 20),
        custom = "validate_password_complexity"
    )]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RequestResetPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,

    #[validate(
        length(min = 8, max = 20),
        custom = "validate_password_complexity"
    )]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_complexity_accepts_valid() {
        assert!(validate_password_complexity("Str0ng@pass").is_ok());
    }

    #[test]
    fn test_password_complexity_rejects_missing_classes() {
        assert!(validate_password_complexity("alllowercase1@").is_err());
        assert!(validate_password_complexity("NoDigits@here").is_err());
        assert!(validate_password_complexity("NoSymbols123").is_err());
    }

    #[test]
    fn test_sign_up_request_validation() {
        let request = SignUpRequest {
            name: "Acme".to_string(),
            email: "not-an-email".to_string(),
            password: "Str0ng@pass".to_string(),
            country: "ES".to_string(),
            industry: "logistics".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
