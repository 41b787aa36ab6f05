use sqlx::PgPool;
use uuid::Uuid;

use crate::models::file::FileRecord;
use crate::utils::errors::{AppError, AppResult};

pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, file: &FileRecord) -> AppResult<FileRecord> {
        let result = sqlx::query_as::<_, FileRecord>(
            r#"
            INSERT INTO files (
                id, company_id, uploaded_by, name, key, url,
                restricted, allowed_employees, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(file.id)
        .bind(file.company_id)
        .bind(file.uploaded_by)
        .bind(&file.name)
        .bind(&file.key)
        .bind(&file.url)
        .bind(file.restricted)
        .bind(&file.allowed_employees)
        .bind(file.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_in_company(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Option<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Archivos de la company en el orden de la consulta, sin reordenar
    pub async fn find_all_by_company(&self, company_id: Uuid) -> AppResult<Vec<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE company_id = $1 ORDER BY created_at",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn count_by_company(&self, company_id: Uuid) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn update_permissions(
        &self,
        id: Uuid,
        restricted: bool,
        allowed_employees: &[String],
    ) -> AppResult<FileRecord> {
        let result = sqlx::query_as::<_, FileRecord>(
            r#"
            UPDATE files
            SET restricted = $2, allowed_employees = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(restricted)
        .bind(allowed_employees)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        Ok(())
    }
}
