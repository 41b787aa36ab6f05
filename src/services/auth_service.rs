//! Servicio de autenticación
//!
//! Alta de companies, sign-in unificado company/employee, confirmación de
//! email, alta de contraseña de employees y reset de contraseña de
//! companies. Las credenciales incorrectas devuelven siempre el mismo error
//! genérico para no filtrar en qué colección existe el email.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{
    ConfirmEmailResponse, SignInRequest, SignInResponse, SignUpRequest,
};
use crate::dto::company_dto::CompanyResponse;
use crate::models::auth::Role;
use crate::models::company::Company;
use crate::repositories::{CompanyRepository, EmployeeRepository};
use crate::services::mail_service::MailService;
use crate::services::token_service::TokenService;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::password::{hash_password, verify_password};

const INCORRECT_CREDENTIALS: &str = "Email or password is incorrect";
const ACTIVATION_PENDING: &str = "Please check your email and activate your account";

fn incorrect_credentials() -> AppError {
    AppError::BadRequest(INCORRECT_CREDENTIALS.to_string())
}

/// Decisión de credenciales: cuenta sin hash almacenado y contraseña que no
/// verifica fallan con el mismo error genérico que un email desconocido
fn check_credentials(stored_hash: Option<&str>, password: &str) -> AppResult<()> {
    let Some(hash) = stored_hash else {
        return Err(incorrect_credentials());
    };

    if !verify_password(password, hash)? {
        return Err(incorrect_credentials());
    }

    Ok(())
}

pub struct AuthService {
    companies: CompanyRepository,
    employees: EmployeeRepository,
    tokens: TokenService,
    mail: MailService,
}

impl AuthService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig, mail: MailService) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool),
            tokens: TokenService::new(&config.jwt_secret),
            mail,
        }
    }

    /// Alta de una company: queda pendiente de activación hasta confirmar
    /// el email
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<CompanyResponse> {
        if self.companies.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "User with that email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let company = Company::new(
            request.name,
            request.email,
            password_hash,
            request.country,
            request.industry,
        );
        let company = self.companies.create(&company).await?;

        let token =
            self.tokens
                .issue_activation(company.id, &company.email, Role::Company, None)?;
        self.mail
            .send_activation_email_to_company(&company.email, &company.name, &token)
            .await?;

        info!("🏢 Company registrada: {}", company.id);
        Ok(company.into())
    }

    /// Sign-in unificado: primero se busca el email entre las companies y
    /// después entre los employees
    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<SignInResponse> {
        if let Some(company) = self.companies.find_by_email(&request.email).await? {
            return self.sign_in_company(company, &request.password).await;
        }

        if let Some(employee) = self.employees.find_by_email(&request.email).await? {
            return self.sign_in_employee(employee, &request.password).await;
        }

        Err(incorrect_credentials())
    }

    async fn sign_in_company(
        &self,
        company: Company,
        password: &str,
    ) -> AppResult<SignInResponse> {
        check_credentials(Some(&company.password_hash), password)?;

        if !company.is_active {
            // Una company inactiva queda bloqueada hasta reactivar; se
            // reenvía el email de activación y no se emite sesión
            let token =
                self.tokens
                    .issue_activation(company.id, &company.email, Role::Company, None)?;
            self.mail
                .send_activation_email_to_company(&company.email, &company.name, &token)
                .await?;

            warn!("Sign-in de company inactiva: {}", company.id);
            return Err(AppError::BadRequest(ACTIVATION_PENDING.to_string()));
        }

        let access_token = self.tokens.issue_session(
            company.id,
            &company.email,
            Role::Company,
            company.is_active,
            None,
        )?;

        Ok(SignInResponse::Session { access_token })
    }

    async fn sign_in_employee(
        &self,
        employee: crate::models::employee::Employee,
        password: &str,
    ) -> AppResult<SignInResponse> {
        check_credentials(employee.password_hash.as_deref(), password)?;

        if !employee.is_active {
            // A diferencia de las companies, un employee inactivo recibe
            // una respuesta informativa sin sesión (bloqueo blando)
            let token = self.tokens.issue_activation(
                employee.id,
                &employee.email,
                Role::Employee,
                Some(employee.company_id),
            )?;
            self.mail
                .resend_activation_email_to_employee(&employee.email, &employee.first_name, &token)
                .await?;

            return Ok(SignInResponse::Info {
                message: ACTIVATION_PENDING.to_string(),
            });
        }

        let access_token = self.tokens.issue_session(
            employee.id,
            &employee.email,
            Role::Employee,
            employee.is_active,
            Some(employee.company_id),
        )?;

        Ok(SignInResponse::Session { access_token })
    }

    /// Confirmación del token de activación. Para una company es la
    /// transición terminal a activa; para un employee se devuelve el token
    /// para que el caller pida la contraseña definitiva.
    pub async fn confirm_email(&self, token: &str) -> AppResult<ConfirmEmailResponse> {
        let claims = self.tokens.decode(token)?;

        match claims.role {
            Role::Company => {
                self.companies.activate_by_email(&claims.email).await?;
                info!("✅ Company activada: {}", claims.sub);
                Ok(ConfirmEmailResponse {
                    message: "Account activated successfully".to_string(),
                    token: None,
                })
            }
            Role::Employee => Ok(ConfirmEmailResponse {
                message: "Please set your password to activate your account".to_string(),
                token: Some(token.to_string()),
            }),
        }
    }

    /// Fija la contraseña definitiva de un employee y activa la cuenta. El
    /// employee se busca estrictamente dentro de la company reclamada por
    /// el token.
    pub async fn set_password(&self, token: &str, password: &str) -> AppResult<String> {
        let claims = self.tokens.decode(token)?;

        let company_id = claims
            .company_id
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        let employee = self
            .employees
            .find_in_company(claims.sub, company_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Employee not found in the specified company".to_string())
            })?;

        let password_hash = hash_password(password)?;
        self.employees
            .set_password_and_activate(employee.id, company_id, &password_hash)
            .await?;

        info!("✅ Employee activado: {}", employee.id);
        Ok("Password set successfully, account activated".to_string())
    }

    /// Fase de petición del reset: emite un token de 15 minutos y lo envía
    /// al email de la company
    pub async fn request_reset_password(&self, email: &str) -> AppResult<String> {
        let company = self
            .companies
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let token = self.tokens.issue_reset(company.id, &company.email)?;
        self.mail
            .send_reset_password_email(&company.email, &company.name, &token)
            .await?;

        Ok("Reset password link sent to your email".to_string())
    }

    /// Fase de completado del reset: sobreescribe la contraseña sin pedir
    /// la anterior
    pub async fn reset_password(&self, token: &str, password: &str) -> AppResult<String> {
        let claims = self.tokens.decode(token)?;

        let company = self
            .companies
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        let password_hash = hash_password(password)?;
        self.companies
            .update_password(company.id, &password_hash)
            .await?;

        Ok("Password reset successfully".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_credentials_pass() {
        let hash = hash_password("S3cret!pass").unwrap();
        assert!(check_credentials(Some(&hash), "S3cret!pass").is_ok());
    }

    #[test]
    fn test_mismatched_credentials_share_the_generic_error() {
        let hash = hash_password("S3cret!pass").unwrap();

        // Email desconocido, cuenta sin hash y contraseña incorrecta deben
        // ser indistinguibles para el caller
        let unknown_email = incorrect_credentials();
        let missing_hash = check_credentials(None, "S3cret!pass").unwrap_err();
        let wrong_password = check_credentials(Some(&hash), "wrong-password").unwrap_err();

        for error in [unknown_email, missing_hash, wrong_password] {
            match error {
                AppError::BadRequest(message) => assert_eq!(message, INCORRECT_CREDENTIALS),
                other => panic!("unexpected error variant: {:?}", other),
            }
        }
    }
}
