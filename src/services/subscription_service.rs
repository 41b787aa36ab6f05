//! Máquina de estados de subscripción
//!
//! Orden total de planes free-tier(0) < basic(1) < premium(2); un plan sin
//! fijar ordena por debajo de free-tier. Upgrade sube estrictamente de
//! nivel y recalcula el precio; downgrade baja estrictamente, comprueba el
//! tope de empleados del plan destino y prorratea el precio del plan
//! antiguo sobre los días restantes de su mes de facturación.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::subscription_dto::{BillingInfoResponse, DowngradeResponse, UpgradeResponse};
use crate::models::company::{Company, SubscriptionPlan};
use crate::repositories::{CompanyRepository, EmployeeRepository, FileRepository};
use crate::utils::errors::{AppError, AppResult};

const PREMIUM_BASE_PRICE: i64 = 300;
const PREMIUM_INCLUDED_FILES: i64 = 1000;
const BASIC_PER_EMPLOYEE_PRICE: i64 = 5;

/// Posición de un plan en el orden total; un plan sin fijar queda por
/// debajo de free-tier
pub fn plan_order(plan: Option<SubscriptionPlan>) -> i8 {
    plan.map(|p| p.order()).unwrap_or(-1)
}

/// Precio del plan con los contadores actuales de la company
pub fn calculate_price(
    plan: SubscriptionPlan,
    employee_count: i64,
    file_count: i64,
) -> Decimal {
    match plan {
        SubscriptionPlan::FreeTier => Decimal::ZERO,
        SubscriptionPlan::Basic => {
            Decimal::from(BASIC_PER_EMPLOYEE_PRICE) * Decimal::from(employee_count)
        }
        SubscriptionPlan::Premium => {
            let mut price = Decimal::from(PREMIUM_BASE_PRICE);
            if file_count > PREMIUM_INCLUDED_FILES {
                // 0.5 por archivo por encima de los 1000 incluidos
                price += Decimal::new(5, 1) * Decimal::from(file_count - PREMIUM_INCLUDED_FILES);
            }
            price
        }
    }
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, first_of_next) {
        (Some(a), Some(b)) => (b - a).num_days(),
        _ => 30,
    }
}

/// Prorrateo del precio antiguo sobre los días restantes del mes de la
/// fecha de inicio: dailyRate = precio / díasDelMes, importe = dailyRate ×
/// díasRestantes, con díasUsados = día de hoy − día de inicio
pub fn prorate(
    old_price: Decimal,
    start_date: DateTime<Utc>,
    today: DateTime<Utc>,
) -> Decimal {
    let total_days = days_in_month(start_date.year(), start_date.month());
    let days_used = today.day() as i64 - start_date.day() as i64;
    let days_remaining = total_days - days_used;

    let daily_rate = old_price / Decimal::from(total_days);
    daily_rate * Decimal::from(days_remaining)
}

/// Fecha de vencimiento: un mes después del inicio de subscripción
pub fn due_date(start_date: DateTime<Utc>) -> DateTime<Utc> {
    start_date
        .checked_add_months(Months::new(1))
        .unwrap_or(start_date)
}

/// Un upgrade debe subir estrictamente de nivel
pub fn validate_upgrade(
    current: Option<SubscriptionPlan>,
    target: SubscriptionPlan,
) -> AppResult<()> {
    if current == Some(target) {
        return Err(AppError::Conflict(format!(
            "Company is already on the '{}' plan",
            target.as_str()
        )));
    }

    if target.order() <= plan_order(current) {
        return Err(AppError::Conflict(format!(
            "Cannot downgrade or stay on the same plan using the upgrade functionality (requested '{}')",
            target.as_str()
        )));
    }

    Ok(())
}

/// Un downgrade debe bajar estrictamente de nivel y no puede dejar a la
/// company por encima del tope de empleados del plan destino. Devuelve el
/// plan actual, cuyo precio es la base del prorrateo.
pub fn validate_downgrade(
    current: Option<SubscriptionPlan>,
    target: SubscriptionPlan,
    employee_count: i64,
) -> AppResult<SubscriptionPlan> {
    if current == Some(target) {
        return Err(AppError::Conflict(format!(
            "Company is already on the '{}' plan",
            target.as_str()
        )));
    }

    let Some(current) = current else {
        return Err(AppError::Conflict(
            "Cannot upgrade or stay on the same plan using the downgrade functionality"
                .to_string(),
        ));
    };

    if target.order() >= current.order() {
        return Err(AppError::Conflict(format!(
            "Cannot upgrade or stay on the same plan using the downgrade functionality (requested '{}')",
            target.as_str()
        )));
    }

    if let Some(limit) = target.employee_limit() {
        if employee_count > limit {
            return Err(AppError::Forbidden(format!(
                "Cannot downgrade to the '{}' plan: company has {} employees, exceeding the limit of {}",
                target.as_str(),
                employee_count,
                limit
            )));
        }
    }

    Ok(current)
}

/// Servicio de subscripción
pub struct SubscriptionService {
    companies: CompanyRepository,
    employees: EmployeeRepository,
    files: FileRepository,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool.clone()),
            files: FileRepository::new(pool),
        }
    }

    async fn load_company(&self, company_id: Uuid) -> AppResult<Company> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
    }

    pub async fn upgrade(
        &self,
        company_id: Uuid,
        target: SubscriptionPlan,
    ) -> AppResult<UpgradeResponse> {
        let company = self.load_company(company_id).await?;

        validate_upgrade(company.subscription_plan, target)?;

        let employee_count = self.employees.count_in_company(company_id).await?;
        let file_count = self.files.count_by_company(company_id).await?;
        let price = calculate_price(target, employee_count, file_count);

        let start = Utc::now();
        self.companies
            .update_subscription(company_id, target, start, price)
            .await?;

        info!(
            "⬆️ Subscripción de {} mejorada a '{}' por {}",
            company_id,
            target.as_str(),
            price
        );

        Ok(UpgradeResponse {
            message: format!("Subscription upgraded to '{}' successfully", target.as_str()),
            price,
            due_date: due_date(start),
        })
    }

    pub async fn downgrade(
        &self,
        company_id: Uuid,
        target: SubscriptionPlan,
    ) -> AppResult<DowngradeResponse> {
        let company = self.load_company(company_id).await?;
        let employee_count = self.employees.count_in_company(company_id).await?;

        let current = validate_downgrade(company.subscription_plan, target, employee_count)?;

        // El prorrateo usa el precio del plan antiguo, calculado antes de
        // tocar el registro
        let file_count = self.files.count_by_company(company_id).await?;
        let old_price = calculate_price(current, employee_count, file_count);
        let now = Utc::now();
        let prorated = company
            .subscription_start_date
            .map(|start| prorate(old_price, start, now))
            .unwrap_or(Decimal::ZERO);

        self.companies
            .update_subscription(company_id, target, now, prorated)
            .await?;

        info!(
            "⬇️ Subscripción de {} reducida a '{}', importe prorrateado {}",
            company_id,
            target.as_str(),
            prorated
        );

        Ok(DowngradeResponse {
            message: format!(
                "Subscription downgraded to '{}' successfully",
                target.as_str()
            ),
        })
    }

    pub async fn billing_info(&self, company_id: Uuid) -> AppResult<BillingInfoResponse> {
        let company = self.load_company(company_id).await?;

        match company.subscription_plan {
            Some(plan) if plan != SubscriptionPlan::FreeTier => Ok(BillingInfoResponse::Billed {
                subscription_plan: plan,
                billing_amount: company.billing_amount,
                billing_due_date: company
                    .subscription_start_date
                    .map(due_date)
                    .unwrap_or_else(Utc::now),
            }),
            _ => Ok(BillingInfoResponse::Free {
                message: "No billing information available for free tier subscription"
                    .to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_price_free_tier_is_zero() {
        assert_eq!(
            calculate_price(SubscriptionPlan::FreeTier, 5, 5),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_price_basic_is_per_seat() {
        assert_eq!(
            calculate_price(SubscriptionPlan::Basic, 7, 0),
            Decimal::from(35)
        );
        assert_eq!(
            calculate_price(SubscriptionPlan::Basic, 0, 0),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_price_premium_base_up_to_included_files() {
        assert_eq!(
            calculate_price(SubscriptionPlan::Premium, 50, 1000),
            Decimal::from(300)
        );
    }

    #[test]
    fn test_price_premium_with_extra_files() {
        // 300 + 200 × 0.5 = 350
        assert_eq!(
            calculate_price(SubscriptionPlan::Premium, 50, 1200),
            Decimal::from(350)
        );
    }

    #[test]
    fn test_prorate_mid_month() {
        // Inicio el día 1 de un mes de 30 días, downgrade el día 11:
        // usados 10, restantes 20 → (precio/30) × 20
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 4, 11, 12, 0, 0).unwrap();
        let prorated = prorate(Decimal::from(300), start, today);
        assert_eq!(prorated, Decimal::from(200));
    }

    #[test]
    fn test_prorate_same_day_keeps_full_price() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let prorated = prorate(Decimal::from(30), start, start);
        assert_eq!(prorated, Decimal::from(30));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_upgrade_rejects_same_plan() {
        assert!(matches!(
            validate_upgrade(Some(SubscriptionPlan::Basic), SubscriptionPlan::Basic),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_upgrade_rejects_lower_plan() {
        assert!(matches!(
            validate_upgrade(Some(SubscriptionPlan::Premium), SubscriptionPlan::Basic),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_upgrade_from_unset_plan_allowed() {
        assert!(validate_upgrade(None, SubscriptionPlan::FreeTier).is_ok());
        assert!(validate_upgrade(None, SubscriptionPlan::Premium).is_ok());
    }

    #[test]
    fn test_upgrade_strictly_increases() {
        assert!(validate_upgrade(Some(SubscriptionPlan::FreeTier), SubscriptionPlan::Basic).is_ok());
        assert!(validate_upgrade(Some(SubscriptionPlan::Basic), SubscriptionPlan::Premium).is_ok());
    }

    #[test]
    fn test_downgrade_rejects_same_plan_and_upgrades() {
        assert!(matches!(
            validate_downgrade(Some(SubscriptionPlan::Basic), SubscriptionPlan::Basic, 0),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            validate_downgrade(Some(SubscriptionPlan::Basic), SubscriptionPlan::Premium, 0),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_downgrade_from_unset_plan_always_conflicts() {
        assert!(matches!(
            validate_downgrade(None, SubscriptionPlan::FreeTier, 0),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_downgrade_to_basic_over_employee_limit_forbidden() {
        assert!(matches!(
            validate_downgrade(Some(SubscriptionPlan::Premium), SubscriptionPlan::Basic, 11),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_downgrade_to_basic_at_employee_limit_allowed() {
        let current =
            validate_downgrade(Some(SubscriptionPlan::Premium), SubscriptionPlan::Basic, 10)
                .unwrap();
        assert_eq!(current, SubscriptionPlan::Premium);
    }

    #[test]
    fn test_downgrade_to_free_tier_over_employee_limit_forbidden() {
        assert!(matches!(
            validate_downgrade(Some(SubscriptionPlan::Basic), SubscriptionPlan::FreeTier, 2),
            Err(AppError::Forbidden(_))
        ));
        assert!(
            validate_downgrade(Some(SubscriptionPlan::Basic), SubscriptionPlan::FreeTier, 1)
                .is_ok()
        );
    }

    #[test]
    fn test_due_date_is_one_month_after_start() {
        let start = Utc.with_ymd_and_hms(2024, 4, 15, 10, 0, 0).unwrap();
        assert_eq!(
            due_date(start),
            Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap()
        );
    }
}
