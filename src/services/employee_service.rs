//! Servicio de employees
//!
//! Alta de empleados por parte de una company activa (con contraseña
//! temporal y email de activación) y operaciones de consulta/baja dentro
//! de la company.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::dto::employee_dto::{CreateEmployeeRequest, EmployeeResponse};
use crate::models::auth::Role;
use crate::models::employee::Employee;
use crate::repositories::EmployeeRepository;
use crate::services::mail_service::MailService;
use crate::services::token_service::TokenService;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::password::{generate_temporary_password, hash_password};

pub struct EmployeeService {
    employees: EmployeeRepository,
    tokens: TokenService,
    mail: MailService,
}

impl EmployeeService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig, mail: MailService) -> Self {
        Self {
            employees: EmployeeRepository::new(pool),
            tokens: TokenService::new(&config.jwt_secret),
            mail,
        }
    }

    /// Alta de un employee: se crea inactivo con una contraseña temporal
    /// que viaja en el email de activación junto al token de 15 minutos
    pub async fn add_employee(
        &self,
        company_id: Uuid,
        request: CreateEmployeeRequest,
    ) -> AppResult<EmployeeResponse> {
        if self.employees.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict(
                "User with that email already exists".to_string(),
            ));
        }

        let temporary_password = generate_temporary_password();
        let password_hash = hash_password(&temporary_password)?;

        let employee = Employee::new(
            company_id,
            request.first_name,
            request.last_name,
            request.email,
            password_hash,
        );
        let employee = self.employees.create(&employee).await?;

        let token = self.tokens.issue_activation(
            employee.id,
            &employee.email,
            Role::Employee,
            Some(company_id),
        )?;
        self.mail
            .send_activation_email_to_employee(
                &employee.email,
                &employee.first_name,
                &token,
                &temporary_password,
            )
            .await?;

        info!("👤 Employee creado en {}: {}", company_id, employee.id);
        Ok(employee.into())
    }

    pub async fn find_all_in_company(
        &self,
        company_id: Uuid,
    ) -> AppResult<Vec<EmployeeResponse>> {
        let employees = self.employees.find_all_in_company(company_id).await?;
        Ok(employees.into_iter().map(EmployeeResponse::from).collect())
    }

    pub async fn find_in_company(
        &self,
        employee_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<EmployeeResponse> {
        let employee = self
            .employees
            .find_in_company(employee_id, company_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Employee not found in the specified company".to_string())
            })?;

        Ok(employee.into())
    }

    pub async fn remove_in_company(
        &self,
        employee_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<String> {
        self.employees
            .delete_in_company(employee_id, company_id)
            .await?;

        info!("👤 Employee eliminado de {}: {}", company_id, employee_id);
        Ok("Employee deleted successfully".to_string())
    }

    pub async fn get_current(&self, employee_id: Uuid) -> AppResult<EmployeeResponse> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        Ok(employee.into())
    }
}
