use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::company::{Company, SubscriptionPlan};
use crate::utils::errors::{AppError, AppResult};

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: &Company) -> AppResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, email, password_hash, country, industry,
                subscription_plan, subscription_start_date, billing_amount,
                is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.password_hash)
        .bind(&company.country)
        .bind(&company.industry)
        .bind(company.subscription_plan)
        .bind(company.subscription_start_date)
        .bind(company.billing_amount)
        .bind(company.is_active)
        .bind(company.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        country: &str,
        industry: &str,
    ) -> AppResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, country = $3, industry = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(country)
        .bind(industry)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Activación terminal de la cuenta tras confirmar el email
    pub async fn activate_by_email(&self, email: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE companies SET is_active = TRUE WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        Ok(())
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE companies SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        Ok(())
    }

    /// Única vía de escritura de los campos de subscripción: la máquina de
    /// estados calcula plan, fecha de inicio e importe y se persisten juntos
    pub async fn update_subscription(
        &self,
        id: Uuid,
        plan: SubscriptionPlan,
        start_date: DateTime<Utc>,
        billing_amount: Decimal,
    ) -> AppResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET subscription_plan = $2, subscription_start_date = $3, billing_amount = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plan)
        .bind(start_date)
        .bind(billing_amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        Ok(())
    }
}
