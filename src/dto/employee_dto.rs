//! DTOs de employee

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::employee::Employee;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 30))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30))]
    pub last_name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

/// Response de employee para la API (sin credenciales)
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            company_id: employee.company_id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            is_active: employee.is_active,
            created_at: employee.created_at,
        }
    }
}
