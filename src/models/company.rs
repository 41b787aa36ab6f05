//! Modelo de Company
//!
//! Este módulo contiene el struct Company (raíz del tenant) y el enum de
//! planes de subscripción con su orden total y sus límites por plan.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Plan de subscripción: free-tier(0) < basic(1) < premium(2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_plan", rename_all = "snake_case")]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionPlan {
    FreeTier,
    Basic,
    Premium,
}

impl SubscriptionPlan {
    /// Posición en el orden total de planes
    pub fn order(&self) -> i8 {
        match self {
            SubscriptionPlan::FreeTier => 0,
            SubscriptionPlan::Basic => 1,
            SubscriptionPlan::Premium => 2,
        }
    }

    /// Máximo de archivos subidos permitidos por el plan
    pub fn file_limit(&self) -> i64 {
        match self {
            SubscriptionPlan::FreeTier => 10,
            SubscriptionPlan::Basic => 100,
            SubscriptionPlan::Premium => 1000,
        }
    }

    /// Máximo de empleados permitidos por el plan; premium no tiene tope
    pub fn employee_limit(&self) -> Option<i64> {
        match self {
            SubscriptionPlan::FreeTier => Some(1),
            SubscriptionPlan::Basic => Some(10),
            SubscriptionPlan::Premium => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::FreeTier => "free-tier",
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Premium => "premium",
        }
    }
}

/// Company principal - mapea exactamente a la tabla companies
///
/// `subscription_plan` es NULL hasta la primera selección explícita y solo
/// cambia a través de la máquina de estados de subscripción.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub country: String,
    pub industry: String,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_start_date: Option<DateTime<Utc>>,
    pub billing_amount: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        country: String,
        industry: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            country,
            industry,
            subscription_plan: None,
            subscription_start_date: None,
            billing_amount: Decimal::ZERO,
            is_active: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_total_order() {
        assert!(SubscriptionPlan::FreeTier.order() < SubscriptionPlan::Basic.order());
        assert!(SubscriptionPlan::Basic.order() < SubscriptionPlan::Premium.order());
    }

    #[test]
    fn test_plan_limits() {
        assert_eq!(SubscriptionPlan::FreeTier.file_limit(), 10);
        assert_eq!(SubscriptionPlan::FreeTier.employee_limit(), Some(1));
        assert_eq!(SubscriptionPlan::Basic.file_limit(), 100);
        assert_eq!(SubscriptionPlan::Basic.employee_limit(), Some(10));
        assert_eq!(SubscriptionPlan::Premium.file_limit(), 1000);
        assert_eq!(SubscriptionPlan::Premium.employee_limit(), None);
    }

    #[test]
    fn test_plan_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(SubscriptionPlan::FreeTier).unwrap(),
            "free-tier"
        );
        assert_eq!(serde_json::to_value(SubscriptionPlan::Premium).unwrap(), "premium");
    }

    #[test]
    fn test_new_company_starts_inactive_without_plan() {
        let company = Company::new(
            "Acme".to_string(),
            "acme@example.com".to_string(),
            "hash".to_string(),
            "ES".to_string(),
            "logistics".to_string(),
        );
        assert!(!company.is_active);
        assert!(company.subscription_plan.is_none());
        assert!(company.subscription_start_date.is_none());
        assert_eq!(company.billing_amount, Decimal::ZERO);
    }
}
