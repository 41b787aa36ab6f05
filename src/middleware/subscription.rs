//! Guards de subscripción
//!
//! Guard de cuota: carga los contadores de archivos y empleados de la
//! company actuante y los compara con los topes del plan. Guard de pago:
//! exige que la subscripción no lleve más de un mes sin renovar. Ambos
//! leen y deciden sin lock: dos requests concurrentes contra la misma
//! company pueden pasar la comprobación a la vez (hueco documentado).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::models::auth::AuthenticatedUser;
use crate::models::company::SubscriptionPlan;
use crate::repositories::{CompanyRepository, EmployeeRepository, FileRepository};
use crate::services::subscription_service::due_date;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

fn actor(request: &Request) -> Result<AuthenticatedUser, AppError> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            AppError::Unauthorized("Unauthorized access: No token provided".to_string())
        })
}

/// Decisión de cuota: falla si cualquiera de los dos topes del plan ya
/// está alcanzado, o si el plan no está fijado
pub fn check_quota(
    plan: Option<SubscriptionPlan>,
    file_count: i64,
    employee_count: i64,
) -> AppResult<()> {
    let plan = plan.ok_or_else(|| AppError::Forbidden("Invalid subscription plan".to_string()))?;

    if file_count >= plan.file_limit() {
        return Err(AppError::Forbidden(
            "File upload limit reached. To upload more files, please upgrade your subscription plan"
                .to_string(),
        ));
    }

    if let Some(limit) = plan.employee_limit() {
        if employee_count >= limit {
            return Err(AppError::Forbidden(
                "Employee limit reached, to add more employees please upgrade your subscription plan"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

/// Decisión de recencia de pago: la fecha de inicio debe existir y no
/// estar vencida en más de un mes
pub fn check_payment_recency(
    start_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let start_date = start_date
        .ok_or_else(|| AppError::Forbidden("Subscription start date is null".to_string()))?;

    if now > due_date(start_date) {
        return Err(AppError::Forbidden(
            "Account access restricted due to unpaid subscription for more than 1 month"
                .to_string(),
        ));
    }

    Ok(())
}

pub async fn subscription_quota_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let actor = actor(&request)?;
    let company_id = actor.acting_company_id()?;

    let company = CompanyRepository::new(state.pool.clone())
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("Company not found".to_string()))?;

    let file_count = FileRepository::new(state.pool.clone())
        .count_by_company(company_id)
        .await?;
    let employee_count = EmployeeRepository::new(state.pool.clone())
        .count_in_company(company_id)
        .await?;

    check_quota(company.subscription_plan, file_count, employee_count)?;

    Ok(next.run(request).await)
}

pub async fn payment_recency_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let actor = actor(&request)?;
    let company_id = actor.acting_company_id()?;

    let company = CompanyRepository::new(state.pool.clone())
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("Company not found".to_string()))?;

    check_payment_recency(company.subscription_start_date, Utc::now())?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_quota_unset_plan_is_forbidden() {
        assert!(matches!(
            check_quota(None, 0, 0),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_quota_free_tier_file_boundary() {
        // 9 archivos deja subir uno más; con 10 el tope ya está alcanzado
        assert!(check_quota(Some(SubscriptionPlan::FreeTier), 9, 0).is_ok());
        assert!(matches!(
            check_quota(Some(SubscriptionPlan::FreeTier), 10, 0),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_quota_free_tier_employee_boundary() {
        assert!(check_quota(Some(SubscriptionPlan::FreeTier), 0, 0).is_ok());
        assert!(matches!(
            check_quota(Some(SubscriptionPlan::FreeTier), 0, 1),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_quota_basic_limits() {
        assert!(check_quota(Some(SubscriptionPlan::Basic), 99, 9).is_ok());
        assert!(check_quota(Some(SubscriptionPlan::Basic), 100, 0).is_err());
        assert!(check_quota(Some(SubscriptionPlan::Basic), 0, 10).is_err());
    }

    #[test]
    fn test_quota_premium_has_no_employee_cap() {
        assert!(check_quota(Some(SubscriptionPlan::Premium), 999, 100_000).is_ok());
        assert!(check_quota(Some(SubscriptionPlan::Premium), 1000, 0).is_err());
    }

    #[test]
    fn test_payment_recency_missing_start_date() {
        assert!(matches!(
            check_payment_recency(None, Utc::now()),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_payment_recency_within_month_passes() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let now = start + Duration::days(20);
        assert!(check_payment_recency(Some(start), now).is_ok());
    }

    #[test]
    fn test_payment_recency_overdue_fails() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let now = start + Duration::days(40);
        assert!(matches!(
            check_payment_recency(Some(start), now),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_payment_recency_exactly_due_passes() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert!(check_payment_recency(Some(start), now).is_ok());
    }
}
