//! DTOs de company

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::employee_dto::EmployeeResponse;
use crate::models::company::{Company, SubscriptionPlan};
use crate::models::file::FileRecord;

/// Response de company para la API (sin credenciales)
#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub country: String,
    pub industry: String,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_start_date: Option<DateTime<Utc>>,
    pub billing_amount: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            email: company.email,
            country: company.country,
            industry: company.industry,
            subscription_plan: company.subscription_plan,
            subscription_start_date: company.subscription_start_date,
            billing_amount: company.billing_amount,
            is_active: company.is_active,
            created_at: company.created_at,
        }
    }
}

/// Response de la company actual con sus relaciones cargadas
#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    #[serde(flatten)]
    pub company: CompanyResponse,
    pub employees: Vec<EmployeeResponse>,
    pub uploaded_files: Vec<FileRecord>,
}

/// Request para actualizar el perfil de la company
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 2, max = 50))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub country: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub industry: Option<String>,
}
