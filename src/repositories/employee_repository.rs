use sqlx::PgPool;
use uuid::Uuid;

use crate::models::employee::Employee;
use crate::utils::errors::{AppError, AppResult};

pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, employee: &Employee) -> AppResult<Employee> {
        let result = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                id, company_id, first_name, last_name, email,
                password_hash, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(employee.id)
        .bind(employee.company_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .bind(employee.is_active)
        .bind(employee.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        let result = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let result = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    /// Búsqueda estricta: el employee debe pertenecer a la company indicada
    pub async fn find_in_company(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Option<Employee>> {
        let result = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_all_in_company(&self, company_id: Uuid) -> AppResult<Vec<Employee>> {
        let result = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE company_id = $1 ORDER BY created_at",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn count_in_company(&self, company_id: Uuid) -> AppResult<i64> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM employees WHERE company_id = $1")
                .bind(company_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Fija la contraseña definitiva y activa la cuenta en un solo paso
    pub async fn set_password_and_activate(
        &self,
        id: Uuid,
        company_id: Uuid,
        password_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET password_hash = $3, is_active = TRUE
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Employee not found in the specified company".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn delete_in_company(&self, id: Uuid, company_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Employee not found in the specified company".to_string(),
            ));
        }

        Ok(())
    }
}
