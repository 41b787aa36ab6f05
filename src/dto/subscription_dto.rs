//! DTOs de subscripción

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::company::SubscriptionPlan;

#[derive(Debug, Deserialize)]
pub struct ChangePlanRequest {
    pub subscription_plan: SubscriptionPlan,
}

#[derive(Debug, Serialize)]
pub struct UpgradeResponse {
    pub message: String,
    pub price: Decimal,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DowngradeResponse {
    pub message: String,
}

/// Billing info: los planes de pago devuelven cifras, el free tier solo un
/// mensaje informativo; los callers deben distinguir por forma
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BillingInfoResponse {
    Billed {
        subscription_plan: SubscriptionPlan,
        billing_amount: Decimal,
        billing_due_date: DateTime<Utc>,
    },
    Free {
        message: String,
    },
}
